#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

pub mod arithmetic;
pub mod config;
pub mod curve;
pub mod diffie_hellman;
pub mod dsa;
pub mod elgamal;
mod error;
#[cfg(test)]
mod fixtures;
pub mod hash;
pub mod keypair;
mod rng;
pub mod wire;

pub use arithmetic::Point;
pub use curve::Curve;
pub use error::ProtocolError;
pub use keypair::Keypair;
pub use rng::random_scalar;
pub use wire::Channel;

/// The side of a two-party run played by this process. Alice accepts the
/// connection, Bob initiates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Alice,
    Bob,
}
