//! Elliptic-curve Diffie-Hellman key agreement.
//!
//! Alice receives Bob's public point before sending her own while Bob sends
//! first, so neither side can block on the other.

use crate::arithmetic::Point;
use crate::curve::Curve;
use crate::error::ProtocolError;
use crate::keypair::Keypair;
use crate::wire::Channel;
use crate::Role;

use rand_core::{CryptoRng, RngCore};

use std::io::{Read, Write};

/// The point `a * b * G` both parties end up with. Turning it into a
/// symmetric key is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedSecret(Point);

impl SharedSecret {
    pub fn point(&self) -> &Point {
        &self.0
    }

    pub fn into_point(self) -> Point {
        self.0
    }
}

pub struct Exchange {
    curve: Curve,
    keypair: Keypair,
}

impl Exchange {
    pub fn new<R: RngCore + CryptoRng>(curve: Curve, rng: &mut R) -> Self {
        let keypair = Keypair::random(&curve, rng);
        Self { curve, keypair }
    }

    pub fn with_keypair(curve: Curve, keypair: Keypair) -> Self {
        Self { curve, keypair }
    }

    pub fn public_point(&self) -> &Point {
        self.keypair.public()
    }

    pub fn shared_secret(&self, peer: &Point) -> SharedSecret {
        SharedSecret(self.curve.scalar_mul(peer, self.keypair.private()))
    }

    pub fn run<S: Read + Write>(
        self,
        channel: &mut Channel<S>,
        role: Role,
    ) -> Result<SharedSecret, ProtocolError> {
        let peer = match role {
            Role::Alice => {
                let peer = channel.receive_curve_point(&self.curve)?;
                channel.send_point(self.public_point())?;
                peer
            }
            Role::Bob => {
                channel.send_point(self.public_point())?;
                channel.receive_curve_point(&self.curve)?
            }
        };
        log::debug!("received peer point {}", peer);
        if peer.is_identity() {
            return Err(ProtocolError::IdentityPublicKey);
        }
        Ok(self.shared_secret(&peer))
    }
}
