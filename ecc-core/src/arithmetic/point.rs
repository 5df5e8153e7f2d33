use num_bigint::BigInt;

use std::fmt;

/// An affine curve point or the point at infinity.
///
/// The identity carries no coordinates, so they cannot be read by mistake.
/// Points are plain values: every group operation on a [`crate::Curve`]
/// returns a fresh `Point` and never writes into one of its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Point {
    Identity,
    Affine { x: BigInt, y: BigInt },
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "infinity"),
            Self::Affine { x, y } => write!(f, "x: {}, y: {}", x, y),
        }
    }
}

impl Point {
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Self::Affine { x, y }
    }

    pub fn from_u64(x: u64, y: u64) -> Self {
        Self::new(BigInt::from(x), BigInt::from(y))
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    pub fn x(&self) -> Option<&BigInt> {
        match self {
            Self::Identity => None,
            Self::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&BigInt> {
        match self {
            Self::Identity => None,
            Self::Affine { y, .. } => Some(y),
        }
    }
}
