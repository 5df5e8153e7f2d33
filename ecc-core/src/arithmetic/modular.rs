use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Reduces `number` into `[0, modulus)`, whatever the sign of `number`.
pub fn reduce(number: &BigInt, modulus: &BigInt) -> BigInt {
    number.mod_floor(modulus)
}

/// Multiplicative inverse of `number` modulo `modulus`.
///
/// Returns `None` when `number` and `modulus` are not coprime, which includes
/// `number ≡ 0`.
pub fn invert(number: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    let reduced = reduce(number, modulus);
    if reduced.is_zero() {
        return None;
    }
    let egcd = reduced.extended_gcd(modulus);
    if !egcd.gcd.is_one() {
        return None;
    }
    Some(reduce(&egcd.x, modulus))
}
