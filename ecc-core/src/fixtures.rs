use crate::arithmetic::Point;
use crate::curve::Curve;

use num_bigint::BigInt;

/// `y^2 = x^3 + x + 1 (mod 5)`, a cyclic group of order 9 generated by (0, 1).
pub fn test_curve() -> Curve {
    Curve::new(
        BigInt::from(5),
        BigInt::from(9),
        BigInt::from(1),
        BigInt::from(1),
        Point::from_u64(0, 1),
    )
}

/// `y^2 = x^3 + 2x + 2 (mod 17)`, prime order 19, G = (5, 1).
pub fn order_19_curve() -> Curve {
    Curve::new(
        BigInt::from(17),
        BigInt::from(19),
        BigInt::from(2),
        BigInt::from(2),
        Point::from_u64(5, 1),
    )
}

fn dec(digits: &str) -> BigInt {
    digits.parse().unwrap()
}

/// NIST P-256.
pub fn p256() -> Curve {
    Curve::new(
        dec("115792089210356248762697446949407573530086143415290314195533631308867097853951"),
        dec("115792089210356248762697446949407573529996955224135760342422259061068512044369"),
        dec("115792089210356248762697446949407573530086143415290314195533631308867097853948"),
        dec("41058363725152142129326129780047268409114441015993725554835256314039467401291"),
        Point::new(
            dec("48439561293906451759052585252797914202762949526041747995844080717082404635286"),
            dec("36134250956749795798585127919587881956611106672985015071877198253568414405109"),
        ),
    )
}
