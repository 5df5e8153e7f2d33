use crate::arithmetic::Point;
use crate::curve::Curve;
use crate::rng::random_scalar;

use num_bigint::BigInt;
use rand_core::{CryptoRng, RngCore};

use std::fmt;

/// A private scalar in `[1, n - 1]` and its public point `private * G`.
#[derive(Clone)]
pub struct Keypair {
    private: BigInt,
    public: Point,
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("private", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

impl Keypair {
    pub fn new(curve: &Curve, private: BigInt) -> Self {
        let public = curve.generator_mul(&private);
        Self { private, public }
    }

    pub fn random<R: RngCore + CryptoRng>(curve: &Curve, rng: &mut R) -> Self {
        Self::new(curve, random_scalar(rng, curve.n()))
    }

    pub fn public(&self) -> &Point {
        &self.public
    }

    pub fn private(&self) -> &BigInt {
        &self.private
    }
}
