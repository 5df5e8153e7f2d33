use crate::arithmetic::{invert, reduce, Point};

use num_bigint::BigInt;
use num_traits::Zero;

/// Short Weierstrass curve `y^2 = x^3 + a4 * x + a6 (mod p)` together with
/// a generator `G` of order `n`.
///
/// The group law is implemented on affine coordinates. Inputs are assumed to
/// lie on the curve; this is not checked here (see [`Curve::is_on_curve`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    p: BigInt,
    n: BigInt,
    a4: BigInt,
    a6: BigInt,
    generator: Point,
}

impl Curve {
    pub fn new(p: BigInt, n: BigInt, a4: BigInt, a6: BigInt, generator: Point) -> Self {
        Self {
            p,
            n,
            a4,
            a6,
            generator,
        }
    }

    pub fn p(&self) -> &BigInt {
        &self.p
    }

    pub fn n(&self) -> &BigInt {
        &self.n
    }

    pub fn generator(&self) -> &Point {
        &self.generator
    }

    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => {
                let lhs = y * y;
                let rhs = x * x * x + &self.a4 * x + &self.a6;
                reduce(&(lhs - rhs), &self.p).is_zero()
            }
        }
    }

    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::new(x.clone(), reduce(&-y, &self.p)),
        }
    }

    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let (xp, yp, xq, yq) = match (lhs, rhs) {
            (Point::Identity, _) => return rhs.clone(),
            (_, Point::Identity) => return lhs.clone(),
            (Point::Affine { x: xp, y: yp }, Point::Affine { x: xq, y: yq }) => (xp, yp, xq, yq),
        };

        let dx = reduce(&(xp - xq), &self.p);
        if dx.is_zero() {
            if reduce(&(yp + yq), &self.p).is_zero() {
                log::trace!("adding opposite points");
                return Point::Identity;
            }
            if reduce(&(yp - yq), &self.p).is_zero() {
                log::trace!("adding equal points, doubling instead");
                return self.double(lhs);
            }
        }

        // (yp - yq) / (xp - xq)
        let lambda = reduce(&((yp - yq) * self.slope_inverse(&dx)), &self.p);
        self.chord(&lambda, xp, yp, xq)
    }

    pub fn double(&self, point: &Point) -> Point {
        let (x, y) = match point {
            Point::Identity => return Point::Identity,
            Point::Affine { x, y } => (x, y),
        };

        let denominator = reduce(&(y * 2u32), &self.p);
        if denominator.is_zero() {
            // a point of order two is its own opposite
            return Point::Identity;
        }

        // (3 * x^2 + a4) / (2 * y)
        let numerator = x * x * 3u32 + &self.a4;
        let lambda = reduce(&(numerator * self.slope_inverse(&denominator)), &self.p);
        self.chord(&lambda, x, y, x)
    }

    /// Double-and-add from the most significant bit of `|scalar|` down to
    /// the least significant one.
    pub fn scalar_mul(&self, point: &Point, scalar: &BigInt) -> Point {
        let scalar = scalar.magnitude();
        let mut result = Point::Identity;
        for i in (0..scalar.bits()).rev() {
            result = self.double(&result);
            if scalar.bit(i) {
                result = self.add(&result, point);
            }
        }
        result
    }

    pub fn generator_mul(&self, scalar: &BigInt) -> Point {
        self.scalar_mul(&self.generator, scalar)
    }

    fn chord(&self, lambda: &BigInt, xp: &BigInt, yp: &BigInt, xq: &BigInt) -> Point {
        let xr = reduce(&(lambda * lambda - xp - xq), &self.p);
        let yr = reduce(&(lambda * (xp - &xr) - yp), &self.p);
        Point::new(xr, yr)
    }

    fn slope_inverse(&self, denominator: &BigInt) -> BigInt {
        // NOTE the identity and opposite-point branches above leave no
        // on-curve input with a zero denominator
        invert(denominator, &self.p).unwrap_or_else(|| {
            panic!(
                "slope denominator {} is not invertible mod {}",
                denominator, self.p
            )
        })
    }
}
