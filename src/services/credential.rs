//! Credential codec
//!
//! Reversible symmetric encryption for stored admin passwords:
//! XChaCha20-Poly1305 under a key derived from the configured secret, with
//! a fresh random nonce per encryption. Login decrypts the stored value and
//! compares plaintexts — this mirrors the legacy system's decrypt-and-compare
//! scheme and is NOT a substitute for one-way hashing: whoever holds the
//! secret can recover every stored password.
//!
//! Stored form is base64 of `nonce || ciphertext`.

use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Key, XChaCha20Poly1305, XNonce,
};
use data_encoding::BASE64;
use sha2::{Digest, Sha256};
use thiserror::Error;

const NONCE_LEN: usize = 24;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("encryption failed")]
    Encrypt,

    /// Stored value is not valid base64 / too short to hold a nonce.
    #[error("malformed ciphertext")]
    Malformed,

    /// Authentication tag mismatch: wrong secret or tampered ciphertext.
    #[error("decryption failed")]
    Decrypt,
}

/// Encrypts and decrypts stored credentials under one derived key.
#[derive(Clone)]
pub struct CredentialCodec {
    key: Key,
}

impl CredentialCodec {
    /// Derive the cipher key from the configured secret.
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        Self {
            key: *Key::from_slice(&digest),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CredentialError> {
        let cipher = XChaCha20Poly1305::new(&self.key);
        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CredentialError::Encrypt)?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(&out))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<String, CredentialError> {
        let raw = BASE64
            .decode(encoded.as_bytes())
            .map_err(|_| CredentialError::Malformed)?;
        if raw.len() <= NONCE_LEN {
            return Err(CredentialError::Malformed);
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let cipher = XChaCha20Poly1305::new(&self.key);
        let plaintext = cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| CredentialError::Decrypt)?;

        String::from_utf8(plaintext).map_err(|_| CredentialError::Decrypt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_recovers_plaintext() {
        let codec = CredentialCodec::new("server-secret");
        for password in ["pw123", "", "päss wörd 🔐", &"x".repeat(500)] {
            let ciphertext = codec.encrypt(password).expect("encrypt");
            assert_ne!(ciphertext, password);
            assert_eq!(codec.decrypt(&ciphertext).expect("decrypt"), password);
        }
    }

    #[test]
    fn ciphertexts_differ_per_encryption() {
        let codec = CredentialCodec::new("server-secret");
        let a = codec.encrypt("pw123").unwrap();
        let b = codec.encrypt("pw123").unwrap();
        // Random nonce: same plaintext, different stored values.
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_secret_cannot_recover_plaintext() {
        let codec = CredentialCodec::new("server-secret");
        let other = CredentialCodec::new("different-secret");

        let ciphertext = codec.encrypt("pw123").unwrap();
        let err = other.decrypt(&ciphertext).unwrap_err();
        assert!(matches!(err, CredentialError::Decrypt));
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let codec = CredentialCodec::new("server-secret");
        let ciphertext = codec.encrypt("pw123").unwrap();

        let mut raw = BASE64.decode(ciphertext.as_bytes()).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = BASE64.encode(&raw);

        assert!(codec.decrypt(&tampered).is_err());
    }

    #[test]
    fn malformed_input_is_rejected() {
        let codec = CredentialCodec::new("server-secret");
        assert!(matches!(codec.decrypt("not base64!!"), Err(CredentialError::Malformed)));
        assert!(matches!(codec.decrypt(""), Err(CredentialError::Malformed)));
        // Valid base64 but shorter than a nonce.
        assert!(matches!(codec.decrypt("AAAA"), Err(CredentialError::Malformed)));
    }
}
