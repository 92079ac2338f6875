use std::fmt;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, Zeroizing};

use crate::error::ResponderError;

pub const PRIVATE_KEY_BYTES: usize = 32;
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Static X25519 key pair plus the per-challenge agreement step.
///
/// The `Debug` implementation carries only the public half.
pub struct KeyAgreement {
    secret: StaticSecret,
    public: PublicKey,
}

impl KeyAgreement {
    pub fn new(private_key: &[u8]) -> Result<Self, ResponderError> {
        if private_key.len() != PRIVATE_KEY_BYTES {
            return Err(ResponderError::InvalidKey {
                found: private_key.len(),
            });
        }
        let mut scalar = [0u8; PRIVATE_KEY_BYTES];
        scalar.copy_from_slice(private_key);
        let secret = StaticSecret::from(scalar);
        scalar.zeroize();
        let public = PublicKey::from(&secret);
        Ok(Self { secret, public })
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.public.to_bytes()
    }

    /// Raw X25519 output for a peer challenge. Challenges that are not
    /// exactly 32 bytes are rejected, as are low-order points whose
    /// agreement output is all zeros.
    pub fn shared_secret(&self, challenge: &[u8]) -> Result<Zeroizing<[u8; 32]>, ResponderError> {
        if challenge.len() != PUBLIC_KEY_BYTES {
            return Err(ResponderError::InvalidChallenge {
                reason: "not a 32-byte curve point",
            });
        }
        let mut point = [0u8; PUBLIC_KEY_BYTES];
        point.copy_from_slice(challenge);
        let shared = self.secret.diffie_hellman(&PublicKey::from(point));
        if !shared.was_contributory() {
            return Err(ResponderError::InvalidChallenge {
                reason: "low-order point",
            });
        }
        Ok(Zeroizing::new(shared.to_bytes()))
    }
}

impl fmt::Debug for KeyAgreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyAgreement")
            .field("public", self.public.as_bytes())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // X25519 key agreement vectors from RFC 7748, section 6.1.
    const ALICE_PRIVATE: [u8; 32] =
        hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
    const ALICE_PUBLIC: [u8; 32] =
        hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
    const BOB_PUBLIC: [u8; 32] =
        hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
    const SHARED: [u8; 32] =
        hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");

    #[test]
    fn derives_public_key() {
        let keys = KeyAgreement::new(&ALICE_PRIVATE).unwrap();
        assert_eq!(keys.public_key(), ALICE_PUBLIC);
    }

    #[test]
    fn agrees_with_peer() {
        let keys = KeyAgreement::new(&ALICE_PRIVATE).unwrap();
        let shared = keys.shared_secret(&BOB_PUBLIC).unwrap();
        assert_eq!(*shared, SHARED);
    }

    #[test]
    fn rejects_wrong_length_private_key() {
        let err = KeyAgreement::new(&ALICE_PRIVATE[..31]).unwrap_err();
        assert!(matches!(err, ResponderError::InvalidKey { found: 31 }));
    }

    #[test]
    fn rejects_wrong_length_challenge() {
        let keys = KeyAgreement::new(&ALICE_PRIVATE).unwrap();
        let err = keys.shared_secret(&BOB_PUBLIC[..16]).unwrap_err();
        assert!(matches!(err, ResponderError::InvalidChallenge { .. }));
    }

    #[test]
    fn rejects_low_order_challenge() {
        let keys = KeyAgreement::new(&ALICE_PRIVATE).unwrap();
        let err = keys.shared_secret(&[0u8; PUBLIC_KEY_BYTES]).unwrap_err();
        assert!(matches!(err, ResponderError::InvalidChallenge { .. }));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let keys = KeyAgreement::new(&ALICE_PRIVATE).unwrap();
        let rendered = format!("{keys:?}");
        // Public point shows up byte for byte; the scalar never does.
        assert!(rendered.contains("133, 32, 240"));
        assert!(!rendered.contains("119, 7, 109"));
    }
}
