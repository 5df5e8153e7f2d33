//! Elliptic-curve DSA over a [`Curve`] and its two-party run.
//!
//! The signer publishes its public key and the message, then sends the
//! signature pair `(u, v)`; the verifier checks it against the received
//! key. Both flows are typed state machines:
//!
//! ```text
//! Signer<Idle>   --publish-->  Signer<AwaitingSignature>     --sign-->   Signer<Signed>
//! Verifier<Idle> --receive-->  Verifier<AwaitingVerification> --verify--> Verifier<Verified>
//! ```

use crate::arithmetic::{invert, reduce, Point};
use crate::curve::Curve;
use crate::error::ProtocolError;
use crate::hash::message_hash;
use crate::keypair::Keypair;
use crate::rng::random_scalar;
use crate::wire::Channel;

use num_bigint::BigInt;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

use std::io::{Read, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    u: BigInt,
    v: BigInt,
}

impl Signature {
    pub fn new(u: BigInt, v: BigInt) -> Self {
        Self { u, v }
    }

    pub fn u(&self) -> &BigInt {
        &self.u
    }

    pub fn v(&self) -> &BigInt {
        &self.v
    }
}

/// Why a signature was not accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("'u' is not in [1, n - 1]")]
    UOutOfRange,
    #[error("'v' is not in [1, n - 1]")]
    VOutOfRange,
    #[error("public key is the point at infinity")]
    IdentityPublicKey,
    #[error("n * public key is not the point at infinity")]
    PublicKeyOrder,
    #[error("'v' has no inverse mod n")]
    NonInvertible,
    #[error("signature does not match the message")]
    Mismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(Rejection),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

fn in_bounds(number: &BigInt, order: &BigInt) -> bool {
    number >= &BigInt::one() && number < order
}

pub fn sign<R: RngCore + CryptoRng>(
    curve: &Curve,
    rng: &mut R,
    msg: &[u8],
    private: &BigInt,
) -> Signature {
    let n = curve.n();
    let hash = message_hash(msg);
    // every failed check discards k and draws a fresh one
    loop {
        let k = random_scalar(rng, n);
        let u = match curve.generator_mul(&k).x() {
            Some(x) => reduce(x, n),
            None => continue,
        };
        if u.is_zero() {
            continue;
        }
        // NOTE k is always invertible when n is prime
        let k_inv = match invert(&k, n) {
            Some(k_inv) => k_inv,
            None => continue,
        };
        let v = reduce(&(k_inv * (&hash + &u * private)), n);
        if !v.is_zero() {
            return Signature { u, v };
        }
    }
}

pub fn verify(curve: &Curve, msg: &[u8], public: &Point, signature: &Signature) -> Verdict {
    let n = curve.n();
    let (u, v) = (&signature.u, &signature.v);
    if !in_bounds(u, n) {
        return Verdict::Invalid(Rejection::UOutOfRange);
    }
    if !in_bounds(v, n) {
        return Verdict::Invalid(Rejection::VOutOfRange);
    }
    if public.is_identity() {
        return Verdict::Invalid(Rejection::IdentityPublicKey);
    }
    if !curve.scalar_mul(public, n).is_identity() {
        return Verdict::Invalid(Rejection::PublicKeyOrder);
    }

    let hash = message_hash(msg);
    let w = match invert(v, n) {
        Some(w) => w,
        None => return Verdict::Invalid(Rejection::NonInvertible),
    };
    let p1 = curve.generator_mul(&reduce(&(&hash * &w), n));
    let p2 = curve.scalar_mul(public, &reduce(&(u * &w), n));
    match curve.add(&p1, &p2).x() {
        Some(x) if &reduce(x, n) == u => Verdict::Valid,
        _ => Verdict::Invalid(Rejection::Mismatch),
    }
}

pub struct Idle;

pub struct AwaitingSignature {
    message: Vec<u8>,
}

pub struct Signed {
    signature: Signature,
}

pub struct Signer<P> {
    curve: Curve,
    keypair: Keypair,
    phase: P,
}

impl<P> Signer<P> {
    pub fn public_key(&self) -> &Point {
        self.keypair.public()
    }
}

impl Signer<Idle> {
    pub fn new(curve: Curve, keypair: Keypair) -> Self {
        Self {
            curve,
            keypair,
            phase: Idle,
        }
    }

    /// Sends the public key followed by the message to be signed.
    pub fn publish<S: Read + Write>(
        self,
        channel: &mut Channel<S>,
        message: Vec<u8>,
    ) -> Result<Signer<AwaitingSignature>, ProtocolError> {
        log::debug!("sending public key {}", self.keypair.public());
        channel.send_point(self.keypair.public())?;
        log::debug!("sending {} byte message", message.len());
        channel.send_message(&message)?;
        Ok(Signer {
            curve: self.curve,
            keypair: self.keypair,
            phase: AwaitingSignature { message },
        })
    }
}

impl Signer<AwaitingSignature> {
    pub fn sign<S: Read + Write, R: RngCore + CryptoRng>(
        self,
        channel: &mut Channel<S>,
        rng: &mut R,
    ) -> Result<Signer<Signed>, ProtocolError> {
        let signature = sign(
            &self.curve,
            rng,
            &self.phase.message,
            self.keypair.private(),
        );
        log::debug!("sending signature u = {}, v = {}", signature.u, signature.v);
        channel.send_number(&signature.u)?;
        channel.send_number(&signature.v)?;
        Ok(Signer {
            curve: self.curve,
            keypair: self.keypair,
            phase: Signed { signature },
        })
    }
}

impl Signer<Signed> {
    pub fn signature(&self) -> &Signature {
        &self.phase.signature
    }
}

pub struct AwaitingVerification {
    public_key: Point,
    message: Vec<u8>,
}

pub struct Verified {
    public_key: Point,
    message: Vec<u8>,
    signature: Signature,
    verdict: Verdict,
}

pub struct Verifier<P> {
    curve: Curve,
    phase: P,
}

impl Verifier<Idle> {
    pub fn new(curve: Curve) -> Self {
        Self { curve, phase: Idle }
    }

    pub fn receive<S: Read + Write>(
        self,
        channel: &mut Channel<S>,
    ) -> Result<Verifier<AwaitingVerification>, ProtocolError> {
        let public_key = channel.receive_curve_point(&self.curve)?;
        log::debug!("received public key {}", public_key);
        let message = channel.receive_message()?;
        log::debug!("received {} byte message", message.len());
        Ok(Verifier {
            curve: self.curve,
            phase: AwaitingVerification {
                public_key,
                message,
            },
        })
    }
}

impl Verifier<AwaitingVerification> {
    pub fn public_key(&self) -> &Point {
        &self.phase.public_key
    }

    pub fn message(&self) -> &[u8] {
        &self.phase.message
    }

    pub fn verify<S: Read + Write>(
        self,
        channel: &mut Channel<S>,
    ) -> Result<Verifier<Verified>, ProtocolError> {
        let u = channel.receive_number()?;
        let v = channel.receive_number()?;
        log::debug!("received signature u = {}, v = {}", u, v);
        let signature = Signature::new(u, v);
        let AwaitingVerification {
            public_key,
            message,
        } = self.phase;
        let verdict = verify(&self.curve, &message, &public_key, &signature);
        if let Verdict::Invalid(rejection) = verdict {
            log::warn!("signature rejected: {}", rejection);
        }
        Ok(Verifier {
            curve: self.curve,
            phase: Verified {
                public_key,
                message,
                signature,
                verdict,
            },
        })
    }
}

impl Verifier<Verified> {
    pub fn verdict(&self) -> Verdict {
        self.phase.verdict
    }

    pub fn public_key(&self) -> &Point {
        &self.phase.public_key
    }

    pub fn message(&self) -> &[u8] {
        &self.phase.message
    }

    pub fn signature(&self) -> &Signature {
        &self.phase.signature
    }
}
