//! Exact-integrity signing over pixel bytes.
//!
//! ECDSA P-256 with SHA-256, keys exchanged as PEM. Signing covers the raw
//! interleaved pixel bytes of the *re-decoded* protected image, so the
//! verifier checks exactly the bytes it will load from disk. Signatures are
//! stored as raw DER with no envelope.
//!
//! A mismatch during verification is an expected outcome and is reported as
//! `false`; only failures to parse key material are errors.

use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};
use p256::pkcs8::{DecodePublicKey, EncodePublicKey};
use rand_core::OsRng;
use tracing::debug;

use crate::error::{PixelSealError, Result};

/// Generate a fresh P-256 keypair for protecting images.
pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
    let signing = SigningKey::random(&mut OsRng);
    let verifying = VerifyingKey::from(&signing);
    (signing, verifying)
}

/// Parse a PKCS#8 PEM private key. Bad key material is a fatal
/// configuration error, never a verification result.
pub fn signing_key_from_pem(pem: &str) -> Result<SigningKey> {
    SigningKey::from_pkcs8_pem(pem)
        .map_err(|e| PixelSealError::CryptoInit(format!("Failed to parse private key: {}", e)))
}

/// Parse an SPKI PEM public key.
pub fn verifying_key_from_pem(pem: &str) -> Result<VerifyingKey> {
    VerifyingKey::from_public_key_pem(pem)
        .map_err(|e| PixelSealError::CryptoInit(format!("Failed to parse public key: {}", e)))
}

/// Encode a private key as PKCS#8 PEM.
pub fn signing_key_to_pem(key: &SigningKey) -> Result<String> {
    key.to_pkcs8_pem(LineEnding::LF)
        .map(|pem| pem.to_string())
        .map_err(|e| PixelSealError::CryptoInit(format!("Failed to encode private key: {}", e)))
}

/// Encode a public key as SPKI PEM.
pub fn verifying_key_to_pem(key: &VerifyingKey) -> Result<String> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| PixelSealError::CryptoInit(format!("Failed to encode public key: {}", e)))
}

/// Sign `bytes` with ECDSA/SHA-256, returning the DER-encoded signature.
pub fn sign(bytes: &[u8], key: &SigningKey) -> Vec<u8> {
    let signature: Signature = key.sign(bytes);
    let der = signature.to_der().as_bytes().to_vec();
    debug!(payload = bytes.len(), signature = der.len(), "Signed pixel bytes");
    der
}

/// Verify a DER-encoded signature over `bytes`.
///
/// Returns `false` for any mismatch: altered bytes, a signature from another
/// key, or bytes that do not parse as a DER signature at all.
pub fn verify(bytes: &[u8], signature: &[u8], key: &VerifyingKey) -> bool {
    let Ok(signature) = Signature::from_der(signature) else {
        return false;
    };
    key.verify(bytes, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_roundtrip() {
        let (signing, verifying) = generate_keypair();
        let payload = b"pixel bytes".to_vec();

        let sig = sign(&payload, &signing);
        assert!(verify(&payload, &sig, &verifying));
    }

    #[test]
    fn test_single_flipped_byte_fails() {
        let (signing, verifying) = generate_keypair();
        let mut payload = vec![1u8, 2, 3, 4, 5, 6, 7, 8];

        let sig = sign(&payload, &signing);
        payload[3] ^= 0x01;
        assert!(!verify(&payload, &sig, &verifying));
    }

    #[test]
    fn test_wrong_key_fails() {
        let (signing, _) = generate_keypair();
        let (_, other_verifying) = generate_keypair();
        let payload = b"pixel bytes";

        let sig = sign(payload, &signing);
        assert!(!verify(payload, &sig, &other_verifying));
    }

    #[test]
    fn test_garbage_signature_is_false_not_error() {
        let (_, verifying) = generate_keypair();
        assert!(!verify(b"payload", &[0xFF; 12], &verifying));
        assert!(!verify(b"payload", &[], &verifying));
    }

    #[test]
    fn test_pem_roundtrip() {
        let (signing, verifying) = generate_keypair();

        let private_pem = signing_key_to_pem(&signing).unwrap();
        assert!(private_pem.contains("PRIVATE KEY"));
        let public_pem = verifying_key_to_pem(&verifying).unwrap();
        assert!(public_pem.contains("PUBLIC KEY"));

        let restored_signing = signing_key_from_pem(&private_pem).unwrap();
        let restored_verifying = verifying_key_from_pem(&public_pem).unwrap();

        let sig = sign(b"payload", &restored_signing);
        assert!(verify(b"payload", &sig, &restored_verifying));
    }

    #[test]
    fn test_bad_pem_is_crypto_init_error() {
        let err = signing_key_from_pem("not a key").unwrap_err();
        assert!(matches!(err, PixelSealError::CryptoInit(_)));

        let err = verifying_key_from_pem("-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n")
            .unwrap_err();
        assert!(matches!(err, PixelSealError::CryptoInit(_)));
    }
}
