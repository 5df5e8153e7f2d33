use num_bigint::{BigInt, Sign};
use sha1::{Digest, Sha1};

/// SHA-1 digest of `msg` read as an unsigned big-endian integer.
pub fn message_hash(msg: &[u8]) -> BigInt {
    let mut hasher = Sha1::new();
    hasher.update(msg);
    BigInt::from_bytes_be(Sign::Plus, &hasher.finalize())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sha1_known_answers() {
        assert_eq!(
            message_hash(b"abc"),
            BigInt::parse_bytes(b"a9993e364706816aba3e25717850c26c9cd0d89d", 16).unwrap()
        );
        assert_eq!(
            message_hash(b""),
            BigInt::parse_bytes(b"da39a3ee5e6b4b0d3255bfef95601890afd80709", 16).unwrap()
        );
    }

    #[test]
    fn leading_zero_bytes_do_not_change_sign() {
        // every digest is non-negative
        let msgs: [&[u8]; 3] = [b"hello world", b"another test and three pugs", b"\x00"];
        for msg in msgs {
            assert!(message_hash(msg).sign() != Sign::Minus);
        }
    }
}
