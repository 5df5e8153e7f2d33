use num_bigint::{BigInt, RandBigInt};
use num_traits::One;
use rand_core::{CryptoRng, RngCore};

/// Uniformly random scalar in `[1, n - 1]`.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R, n: &BigInt) -> BigInt {
    rng.gen_bigint_range(&BigInt::one(), n)
}
