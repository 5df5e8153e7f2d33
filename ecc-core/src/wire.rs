//! Framing of numbers, points and raw messages on a byte stream.
//!
//! * number: 4-byte signed length `L` in native byte order, then `L` bytes
//!   of base-10 ASCII digits (optionally signed) ending in a zero byte
//! * point: one flag byte, nonzero for the point at infinity; otherwise the
//!   flag is followed by the number frames of `x` and `y`
//! * message: 4-byte signed length in native byte order, then the raw bytes

use crate::arithmetic::Point;
use crate::curve::Curve;
use crate::error::ProtocolError;

use num_bigint::BigInt;
use thiserror::Error;

use std::io::{self, Read, Write};

/// Largest raw message accepted by [`Channel::receive_message`].
pub const MAX_MESSAGE_LEN: usize = 2048;

// NOTE a 64 KiB frame holds numbers far beyond any curve size in use
const MAX_NUMBER_FRAME_LEN: i32 = 1 << 16;

const IDENTITY_FLAG: u8 = 1;
const AFFINE_FLAG: u8 = 0;

#[derive(Error, Debug)]
pub enum WireError {
    #[error("transport failure: {0}")]
    Io(#[from] io::Error),
    #[error("invalid frame length {0}")]
    InvalidLength(i32),
    #[error("number frame is not zero-terminated")]
    MissingTerminator,
    #[error("number frame does not hold a decimal integer")]
    MalformedNumber,
    #[error("message of {0} bytes exceeds the {1} byte limit")]
    MessageTooLarge(usize, usize),
}

/// A bidirectional byte stream to the peer, speaking the frame format
/// described in the module documentation.
#[derive(Debug)]
pub struct Channel<S> {
    stream: S,
}

impl<S: Read + Write> Channel<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    pub fn send_number(&mut self, number: &BigInt) -> Result<(), WireError> {
        let mut frame = Vec::new();
        encode_number(number, &mut frame)?;
        self.write_frame(&frame)
    }

    pub fn receive_number(&mut self) -> Result<BigInt, WireError> {
        let len = self.read_length()?;
        if len <= 0 || len > MAX_NUMBER_FRAME_LEN {
            return Err(WireError::InvalidLength(len));
        }
        // NOTE the bounds check above makes the cast lossless
        let mut buf = vec![0u8; len as usize];
        self.stream.read_exact(&mut buf)?;
        let end = buf
            .iter()
            .position(|&b| b == 0)
            .ok_or(WireError::MissingTerminator)?;
        parse_decimal(&buf[..end])
    }

    pub fn send_point(&mut self, point: &Point) -> Result<(), WireError> {
        let mut frame = Vec::new();
        match point {
            Point::Identity => frame.push(IDENTITY_FLAG),
            Point::Affine { x, y } => {
                frame.push(AFFINE_FLAG);
                encode_number(x, &mut frame)?;
                encode_number(y, &mut frame)?;
            }
        }
        self.write_frame(&frame)
    }

    pub fn receive_point(&mut self) -> Result<Point, WireError> {
        let mut flag = [0u8; 1];
        self.stream.read_exact(&mut flag)?;
        if flag[0] != AFFINE_FLAG {
            return Ok(Point::Identity);
        }
        let x = self.receive_number()?;
        let y = self.receive_number()?;
        Ok(Point::new(x, y))
    }

    /// Receives a point that is about to enter the group law of `curve`.
    pub fn receive_curve_point(&mut self, curve: &Curve) -> Result<Point, ProtocolError> {
        let point = self.receive_point()?;
        if !curve.is_on_curve(&point) {
            return Err(ProtocolError::PointNotOnCurve);
        }
        Ok(point)
    }

    pub fn send_message(&mut self, msg: &[u8]) -> Result<(), WireError> {
        if msg.len() > MAX_MESSAGE_LEN {
            return Err(WireError::MessageTooLarge(msg.len(), MAX_MESSAGE_LEN));
        }
        let mut frame = Vec::with_capacity(4 + msg.len());
        frame.extend_from_slice(&frame_length(msg.len())?.to_ne_bytes());
        frame.extend_from_slice(msg);
        self.write_frame(&frame)
    }

    pub fn receive_message(&mut self) -> Result<Vec<u8>, WireError> {
        let len = self.read_length()?;
        let len = usize::try_from(len).map_err(|_| WireError::InvalidLength(len))?;
        if len > MAX_MESSAGE_LEN {
            return Err(WireError::MessageTooLarge(len, MAX_MESSAGE_LEN));
        }
        let mut msg = vec![0u8; len];
        self.stream.read_exact(&mut msg)?;
        Ok(msg)
    }

    fn read_length(&mut self) -> Result<i32, WireError> {
        let mut buf = [0u8; 4];
        self.stream.read_exact(&mut buf)?;
        Ok(i32::from_ne_bytes(buf))
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), WireError> {
        self.stream.write_all(frame)?;
        self.stream.flush()?;
        Ok(())
    }
}

fn frame_length(len: usize) -> Result<i32, WireError> {
    i32::try_from(len).map_err(|_| WireError::InvalidLength(i32::MAX))
}

/// Optional sign followed by at least one ASCII digit, nothing else.
fn parse_decimal(bytes: &[u8]) -> Result<BigInt, WireError> {
    let digits = match bytes {
        [b'+' | b'-', rest @ ..] => rest,
        _ => bytes,
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(WireError::MalformedNumber);
    }
    BigInt::parse_bytes(bytes, 10).ok_or(WireError::MalformedNumber)
}

fn encode_number(number: &BigInt, frame: &mut Vec<u8>) -> Result<(), WireError> {
    let digits = number.to_str_radix(10);
    let len = frame_length(digits.len() + 1)?;
    if len > MAX_NUMBER_FRAME_LEN {
        return Err(WireError::InvalidLength(len));
    }
    frame.extend_from_slice(&len.to_ne_bytes());
    frame.extend_from_slice(digits.as_bytes());
    frame.push(0);
    Ok(())
}
