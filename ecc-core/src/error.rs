use crate::wire::WireError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error(transparent)]
    Wire(#[from] WireError),
    #[error("received point is not on the curve")]
    PointNotOnCurve,
    #[error("public key is the point at infinity")]
    IdentityPublicKey,
    #[error("plaintext must lie in [0, p)")]
    PlaintextOutOfRange,
    #[error("shared point is the point at infinity")]
    IdentitySharedPoint,
    #[error("ciphertext carries no payload coordinate")]
    MalformedCiphertext,
}
