//! Loading of curve description files.
//!
//! A curve file is a list of `key=value` lines holding decimal integers:
//!
//! ```text
//! p=5
//! n=9
//! a4=1
//! a6=1
//! gx=0
//! gy=1
//! ```
//!
//! Keys other than `p`, `n`, `a4`, `a6`, `gx` and `gy` are ignored.

use crate::arithmetic::Point;
use crate::curve::Curve;

use config::{Config, File, FileFormat};
use num_bigint::BigInt;
use serde::Deserialize;
use thiserror::Error;

use std::path::Path;

#[derive(Error, Debug)]
pub enum CurveFileError {
    #[error("failed to read curve file: {0}")]
    Read(#[from] config::ConfigError),
    #[error("value of '{0}' is not a decimal integer")]
    Malformed(&'static str),
    #[error("modulus must be greater than 3")]
    InvalidModulus,
    #[error("generator order must be at least 2")]
    InvalidOrder,
    #[error("generator is not on the curve")]
    GeneratorNotOnCurve,
}

#[derive(Deserialize, Debug)]
struct CurveFile {
    p: String,
    n: String,
    a4: String,
    a6: String,
    gx: String,
    gy: String,
}

impl CurveFile {
    fn into_curve(self) -> Result<Curve, CurveFileError> {
        let p = parse_decimal("p", &self.p)?;
        let n = parse_decimal("n", &self.n)?;
        let a4 = parse_decimal("a4", &self.a4)?;
        let a6 = parse_decimal("a6", &self.a6)?;
        let gx = parse_decimal("gx", &self.gx)?;
        let gy = parse_decimal("gy", &self.gy)?;

        if p <= BigInt::from(3) {
            return Err(CurveFileError::InvalidModulus);
        }
        if n < BigInt::from(2) {
            return Err(CurveFileError::InvalidOrder);
        }
        let curve = Curve::new(p, n, a4, a6, Point::new(gx, gy));
        if !curve.is_on_curve(curve.generator()) {
            return Err(CurveFileError::GeneratorNotOnCurve);
        }
        Ok(curve)
    }
}

fn parse_decimal(key: &'static str, value: &str) -> Result<BigInt, CurveFileError> {
    BigInt::parse_bytes(value.trim().as_bytes(), 10).ok_or(CurveFileError::Malformed(key))
}

pub fn load_curve<P: AsRef<Path>>(path: P) -> Result<Curve, CurveFileError> {
    let path = path.as_ref();
    let conf = Config::builder()
        .add_source(File::from(path).format(FileFormat::Ini))
        .build()?;
    let curve = conf.try_deserialize::<CurveFile>()?.into_curve()?;
    log::debug!("loaded curve from {}", path.display());
    Ok(curve)
}

pub fn parse_curve(contents: &str) -> Result<Curve, CurveFileError> {
    let conf = Config::builder()
        .add_source(File::from_str(contents, FileFormat::Ini))
        .build()?;
    conf.try_deserialize::<CurveFile>()?.into_curve()
}
