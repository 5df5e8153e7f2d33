//! ElGamal-style encryption of an integer in `[0, p)`.
//!
//! The message is added to the x coordinate of the ephemeral shared point
//! `T = k * Q` rather than mapped onto the curve:
//!
//! ```text
//! C1 = k * G
//! C2 = (m + T.x mod p, T.y)
//! m  = C2.x - (d * C1).x mod p
//! ```
//!
//! `C2` is therefore generally not a curve point and only its x coordinate
//! is read back.

use crate::arithmetic::{reduce, Point};
use crate::curve::Curve;
use crate::error::ProtocolError;
use crate::keypair::Keypair;
use crate::rng::random_scalar;
use crate::wire::Channel;

use num_bigint::{BigInt, Sign};
use rand_core::{CryptoRng, RngCore};

use std::io::{Read, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    c1: Point,
    c2: Point,
}

impl Ciphertext {
    pub fn new(c1: Point, c2: Point) -> Self {
        Self { c1, c2 }
    }

    pub fn c1(&self) -> &Point {
        &self.c1
    }

    pub fn c2(&self) -> &Point {
        &self.c2
    }
}

pub fn encrypt<R: RngCore + CryptoRng>(
    curve: &Curve,
    rng: &mut R,
    public: &Point,
    message: &BigInt,
) -> Result<Ciphertext, ProtocolError> {
    if message.sign() == Sign::Minus || message >= curve.p() {
        return Err(ProtocolError::PlaintextOutOfRange);
    }
    if public.is_identity() {
        return Err(ProtocolError::IdentityPublicKey);
    }

    // k * Q is the identity only when the order of Q divides k, draw again
    loop {
        let k = random_scalar(rng, curve.n());
        if let Point::Affine { x, y } = curve.scalar_mul(public, &k) {
            let c1 = curve.generator_mul(&k);
            let c2 = Point::new(reduce(&(message + x), curve.p()), y);
            return Ok(Ciphertext { c1, c2 });
        }
    }
}

pub fn decrypt(
    curve: &Curve,
    private: &BigInt,
    ciphertext: &Ciphertext,
) -> Result<BigInt, ProtocolError> {
    let shared = curve.scalar_mul(&ciphertext.c1, private);
    let sx = shared.x().ok_or(ProtocolError::IdentitySharedPoint)?;
    let c2x = ciphertext
        .c2
        .x()
        .ok_or(ProtocolError::MalformedCiphertext)?;
    Ok(reduce(&(c2x - sx), curve.p()))
}

/// Owner of the key pair: publishes the public key and decrypts what comes
/// back.
pub struct Recipient {
    curve: Curve,
    keypair: Keypair,
}

impl Recipient {
    pub fn new<R: RngCore + CryptoRng>(curve: Curve, rng: &mut R) -> Self {
        let keypair = Keypair::random(&curve, rng);
        Self { curve, keypair }
    }

    pub fn with_keypair(curve: Curve, keypair: Keypair) -> Self {
        Self { curve, keypair }
    }

    pub fn public_key(&self) -> &Point {
        self.keypair.public()
    }

    pub fn publish<S: Read + Write>(&self, channel: &mut Channel<S>) -> Result<(), ProtocolError> {
        log::debug!("sending public key {}", self.public_key());
        channel.send_point(self.public_key())?;
        Ok(())
    }

    pub fn receive<S: Read + Write>(
        &self,
        channel: &mut Channel<S>,
    ) -> Result<BigInt, ProtocolError> {
        let c1 = channel.receive_curve_point(&self.curve)?;
        // C2 is not expected to lie on the curve
        let c2 = channel.receive_point()?;
        log::debug!("received ciphertext C1 = {}, C2 = {}", c1, c2);
        decrypt(&self.curve, self.keypair.private(), &Ciphertext::new(c1, c2))
    }
}

/// Encrypts for a recipient whose public key was received from the wire.
pub struct Sender {
    curve: Curve,
    recipient_key: Point,
}

impl Sender {
    pub fn new(curve: Curve, recipient_key: Point) -> Self {
        Self {
            curve,
            recipient_key,
        }
    }

    pub fn receive_key<S: Read + Write>(
        curve: Curve,
        channel: &mut Channel<S>,
    ) -> Result<Self, ProtocolError> {
        let recipient_key = channel.receive_curve_point(&curve)?;
        log::debug!("received recipient key {}", recipient_key);
        Ok(Self::new(curve, recipient_key))
    }

    pub fn recipient_key(&self) -> &Point {
        &self.recipient_key
    }

    pub fn send<S: Read + Write, R: RngCore + CryptoRng>(
        &self,
        channel: &mut Channel<S>,
        rng: &mut R,
        message: &BigInt,
    ) -> Result<Ciphertext, ProtocolError> {
        let ciphertext = encrypt(&self.curve, rng, &self.recipient_key, message)?;
        channel.send_point(&ciphertext.c1)?;
        channel.send_point(&ciphertext.c2)?;
        Ok(ciphertext)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures::{p256, test_curve};
    use num_bigint::RandBigInt;
    use num_traits::Zero;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    #[test]
    fn encryption_and_decryption() {
        let curve = p256();
        let mut rng = StdRng::seed_from_u64(8);
        let keypair = Keypair::random(&curve, &mut rng);
        let other_keypair = Keypair::random(&curve, &mut rng);

        let p_minus_one = curve.p() - 1u32;
        let mut messages = vec![BigInt::zero(), BigInt::from(42), p_minus_one];
        messages.push(rng.gen_bigint_range(&BigInt::zero(), curve.p()));
        for message in &messages {
            let ciphertext = encrypt(&curve, &mut rng, keypair.public(), message).unwrap();
            assert!(curve.is_on_curve(ciphertext.c1()));
            assert_eq!(
                &decrypt(&curve, keypair.private(), &ciphertext).unwrap(),
                message
            );
            assert_ne!(
                &decrypt(&curve, other_keypair.private(), &ciphertext).unwrap(),
                message
            );
        }
    }

    #[test]
    fn payload_sits_in_x_coordinate() {
        let curve = test_curve();
        let mut rng = StdRng::seed_from_u64(9);
        let keypair = Keypair::new(&curve, BigInt::from(2));
        for m in 0..5 {
            let message = BigInt::from(m);
            let ciphertext = encrypt(&curve, &mut rng, keypair.public(), &message).unwrap();
            let t = curve.scalar_mul(ciphertext.c1(), keypair.private());
            assert_eq!(
                ciphertext.c2().x().unwrap(),
                &reduce(&(&message + t.x().unwrap()), curve.p())
            );
            assert_eq!(ciphertext.c2().y(), t.y());
            assert_eq!(
                decrypt(&curve, keypair.private(), &ciphertext).unwrap(),
                message
            );
        }
    }

    #[test]
    fn small_order_key_redraws_nonce() {
        // 3 * G has order 3, so every k divisible by 3 hits the identity
        let curve = test_curve();
        let mut rng = StdRng::seed_from_u64(13);
        let keypair = Keypair::new(&curve, BigInt::from(3));
        assert_eq!(keypair.public(), &Point::from_u64(2, 1));
        for _ in 0..50 {
            let message = BigInt::from(4);
            let ciphertext = encrypt(&curve, &mut rng, keypair.public(), &message).unwrap();
            assert!(!ciphertext.c1().is_identity());
            assert!(!ciphertext.c2().is_identity());
            assert_eq!(
                decrypt(&curve, keypair.private(), &ciphertext).unwrap(),
                message
            );
        }
    }

    #[test]
    fn plaintext_range() {
        let curve = test_curve();
        let mut rng = StdRng::seed_from_u64(10);
        let public = curve.generator().clone();
        for message in [BigInt::from(-1), BigInt::from(5), BigInt::from(6)] {
            assert!(matches!(
                encrypt(&curve, &mut rng, &public, &message),
                Err(ProtocolError::PlaintextOutOfRange)
            ));
        }
        assert!(matches!(
            encrypt(&curve, &mut rng, &Point::Identity, &BigInt::from(1)),
            Err(ProtocolError::IdentityPublicKey)
        ));
    }

    #[test]
    fn malformed_ciphertext() {
        let curve = test_curve();
        let ciphertext = Ciphertext::new(curve.generator().clone(), Point::Identity);
        assert!(matches!(
            decrypt(&curve, &BigInt::from(2), &ciphertext),
            Err(ProtocolError::MalformedCiphertext)
        ));
        let ciphertext = Ciphertext::new(Point::Identity, Point::from_u64(1, 1));
        assert!(matches!(
            decrypt(&curve, &BigInt::from(2), &ciphertext),
            Err(ProtocolError::IdentitySharedPoint)
        ));
    }

    #[test]
    fn recipient_accepts_off_curve_c2() {
        let curve = p256();
        let mut rng = StdRng::seed_from_u64(12);
        let recipient = Recipient::new(curve.clone(), &mut rng);
        let sender = Sender::new(curve, recipient.public_key().clone());

        let message = BigInt::from(123456789);
        let mut channel = Channel::new(Cursor::new(Vec::new()));
        sender.send(&mut channel, &mut rng, &message).unwrap();
        channel.get_mut().set_position(0);
        assert_eq!(recipient.receive(&mut channel).unwrap(), message);
    }
}
