//! Secp256k1 implementation of ECDSA key generation, signing, and verification.
//!
//! Public keys are held in compressed form (SEC 1, Version 2.0, Section 2.3.3); both the
//! compressed and uncompressed encodings are accepted on decode. Messages are hashed with
//! double SHA-256 before signing, nonces are generated deterministically as specified in
//! [RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979), and signatures are normalized
//! according to [BIP 62](https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki#low-s-values-in-signatures).
//! Signatures that are not in low-s form fail verification.
//!
//! Keys additionally support deterministic child derivation (`key + SHA-256(message)`,
//! mirrored on the public side) and a message-bound shared secret computed over derived
//! keys.
//!
//! # Example
//! ```rust
//! use signet_cryptography::{secp256k1::PrivateKey, Signer, Verifier};
//! use rand::rngs::OsRng;
//!
//! // Generate a new private key
//! let signer = PrivateKey::from_rng(&mut OsRng).expect("entropy unavailable");
//!
//! // Create a message to sign
//! let namespace = Some(&b"demo"[..]);
//! let msg = b"hello, world!";
//!
//! // Sign the message
//! let signature = signer.sign(namespace, msg);
//!
//! // Verify the signature
//! assert!(signer.public_key().verify(namespace, msg, &signature));
//! ```

use crate::{Signer, Verifier};
use k256::{
    ecdsa::{
        signature::hazmat::{PrehashSigner, PrehashVerifier},
        SigningKey, VerifyingKey,
    },
    elliptic_curve::{ops::Reduce, scalar::IsHigh, sec1::ToEncodedPoint},
    ProjectivePoint, Scalar, U256,
};
use rand::{rngs::StdRng, CryptoRng, RngCore, SeedableRng};
use sha2::{Digest as _, Sha256};
use signet_utils::{hex, union_unique};
use std::{borrow::Cow, fmt};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const PRIVATE_KEY_LENGTH: usize = 32;
const PUBLIC_KEY_LENGTH: usize = 33; // Y-Parity || X
const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65; // 0x04 || X || Y
const SIGNATURE_LENGTH: usize = 64; // R || S
const SHARED_SECRET_LENGTH: usize = 64; // X || Y

/// Errors that can occur when working with secp256k1 keys and signatures.
///
/// A signature that is well-formed but wrong for a message is not an error:
/// [Verifier::verify] returns `false` for it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(rand::Error),
    #[error("invalid private key")]
    InvalidKey,
    #[error("malformed public key")]
    MalformedPublicKey,
    #[error("malformed signature")]
    MalformedSignature,
}

/// Double SHA-256 digest committed to by every signature.
fn hash256(data: &[u8]) -> [u8; 32] {
    let inner = Sha256::digest(data);
    Sha256::digest(inner).into()
}

/// Compute the digest of a message under an optional namespace.
fn payload_digest(namespace: Option<&[u8]>, message: &[u8]) -> [u8; 32] {
    let payload = match namespace {
        Some(namespace) => Cow::Owned(union_unique(namespace, message)),
        None => Cow::Borrowed(message),
    };
    hash256(&payload)
}

/// Scalar tweak used for child-key derivation: SHA-256 of the message, reduced mod n.
fn derivation_tweak(message: &[u8]) -> Scalar {
    let digest = Sha256::digest(message);
    <Scalar as Reduce<U256>>::reduce_bytes(&digest)
}

/// A secp256k1 private key: a scalar in [1, n-1].
///
/// The scalar is never printed; `Debug` and `Display` show `[REDACTED]`.
#[derive(Clone)]
pub struct PrivateKey {
    key: SigningKey,
}

impl PrivateKey {
    /// Generate a fresh [PrivateKey] using the supplied RNG.
    ///
    /// Candidates are rejection-sampled so the scalar is uniform over [1, n-1].
    /// Fails with [Error::EntropyUnavailable] if the RNG cannot produce secure bytes.
    pub fn from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, Error> {
        let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        loop {
            rng.try_fill_bytes(&mut *candidate)
                .map_err(Error::EntropyUnavailable)?;
            // Zero or >= n: discard and resample.
            if let Ok(key) = SigningKey::from_slice(&*candidate) {
                return Ok(Self { key });
            }
        }
    }

    /// Create a [PrivateKey] from a seed.
    ///
    /// # Warning
    ///
    /// This function is insecure and should only be used for examples
    /// and testing.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        loop {
            rng.fill_bytes(&mut *candidate);
            if let Ok(key) = SigningKey::from_slice(&*candidate) {
                return Self { key };
            }
        }
    }

    /// Decode a 32-byte big-endian scalar.
    ///
    /// Fails with [Error::InvalidKey] if the buffer is not 32 bytes or the scalar
    /// is zero or >= n.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: &[u8; PRIVATE_KEY_LENGTH] = bytes.try_into().map_err(|_| Error::InvalidKey)?;
        let key = SigningKey::from_slice(bytes).map_err(|_| Error::InvalidKey)?;
        Ok(Self { key })
    }

    /// Export the raw 32-byte big-endian scalar. The returned buffer is zeroized on drop.
    pub fn encode(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        let mut encoded = [0u8; PRIVATE_KEY_LENGTH];
        encoded.copy_from_slice(self.key.to_bytes().as_slice());
        Zeroizing::new(encoded)
    }

    /// Deterministically derive a child key from this key and a message:
    /// `child = self + SHA-256(message) mod n`.
    ///
    /// The derived key's public counterpart equals `self.public_key().derive(message)`.
    /// Fails with [Error::InvalidKey] in the (cryptographically unreachable) case that
    /// the tweaked scalar is zero.
    pub fn derive(&self, message: &[u8]) -> Result<Self, Error> {
        let scalar = <Scalar as Reduce<U256>>::reduce_bytes(&self.key.to_bytes())
            + derivation_tweak(message);
        let key = SigningKey::from_bytes(&scalar.to_bytes()).map_err(|_| Error::InvalidKey)?;
        Ok(Self { key })
    }

    /// Produce a shared secret from the other party's public key and a common message.
    ///
    /// Both sides derive child keys with the message first, then multiply, so the result
    /// is symmetric: `a.shared_secret(&b_pub, msg) == b.shared_secret(&a_pub, msg)`.
    /// The output is the 64-byte `x || y` encoding of the resulting point.
    pub fn shared_secret(
        &self,
        peer: &PublicKey,
        message: &[u8],
    ) -> Result<SharedSecret, Error> {
        let ours = self.derive(message)?;
        let theirs = peer.derive(message)?;
        let scalar = <Scalar as Reduce<U256>>::reduce_bytes(&ours.key.to_bytes());
        let point = (ProjectivePoint::from(*theirs.key.as_affine()) * scalar).to_affine();
        let encoded = point.to_encoded_point(false);
        let encoded = encoded.as_bytes();
        // A nonzero scalar times a valid public key cannot be the identity.
        if encoded.len() != UNCOMPRESSED_PUBLIC_KEY_LENGTH {
            return Err(Error::InvalidKey);
        }
        let mut secret = [0u8; SHARED_SECRET_LENGTH];
        secret.copy_from_slice(&encoded[1..]);
        Ok(SharedSecret(secret))
    }
}

impl Signer for PrivateKey {
    type Signature = Signature;
    type PublicKey = PublicKey;

    fn public_key(&self) -> PublicKey {
        PublicKey {
            key: self.key.verifying_key().to_owned(),
        }
    }

    fn sign(&self, namespace: Option<&[u8]>, msg: &[u8]) -> Signature {
        let digest = payload_digest(namespace, msg);
        let signature: k256::ecdsa::Signature = self
            .key
            .sign_prehash(&digest)
            .expect("RFC 6979 signing over a 32-byte digest is infallible");
        // Low-s form only (BIP 62).
        let signature = signature.normalize_s().unwrap_or(signature);
        Signature { signature }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// A secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    key: VerifyingKey,
}

impl PublicKey {
    /// Decode a SEC1-encoded curve point: 33-byte compressed or 65-byte uncompressed.
    ///
    /// Fails with [Error::MalformedPublicKey] for any other length, an x-coordinate
    /// out of field range, or a point not on the curve.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != PUBLIC_KEY_LENGTH && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_LENGTH {
            return Err(Error::MalformedPublicKey);
        }
        let key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| Error::MalformedPublicKey)?;
        Ok(Self { key })
    }

    /// Encode as a SEC1 compressed point, the canonical output form.
    pub fn encode(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let point = self.key.to_encoded_point(true);
        let mut encoded = [0u8; PUBLIC_KEY_LENGTH];
        encoded.copy_from_slice(point.as_bytes());
        encoded
    }

    /// Deterministically derive a child public key from this key and a message:
    /// `child = self + SHA-256(message) * G`.
    ///
    /// Matches [PrivateKey::derive]: for any private key `k`,
    /// `k.derive(m).public_key() == k.public_key().derive(m)`.
    pub fn derive(&self, message: &[u8]) -> Result<Self, Error> {
        let point = ProjectivePoint::from(*self.key.as_affine())
            + ProjectivePoint::GENERATOR * derivation_tweak(message);
        let key = VerifyingKey::from_affine(point.to_affine()).map_err(|_| Error::InvalidKey)?;
        Ok(Self { key })
    }
}

impl Verifier for PublicKey {
    type Signature = Signature;

    fn verify(&self, namespace: Option<&[u8]>, msg: &[u8], sig: &Signature) -> bool {
        if sig.signature.s().is_high().into() {
            // Reject any signature with an `s` value in the upper half of the curve order.
            return false;
        }
        let digest = payload_digest(namespace, msg);
        self.key.verify_prehash(&digest, &sig.signature).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex(&self.encode()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex(&self.encode()))
    }
}

/// An ECDSA signature in fixed-size 64-byte `r || s` form.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    signature: k256::ecdsa::Signature,
}

impl Signature {
    /// Decode a 64-byte `r || s` signature.
    ///
    /// Fails with [Error::MalformedSignature] for any other length or if either
    /// scalar is zero or >= n. High-s signatures decode successfully but never
    /// verify.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: &[u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| Error::MalformedSignature)?;
        let signature =
            k256::ecdsa::Signature::from_slice(bytes).map_err(|_| Error::MalformedSignature)?;
        Ok(Self { signature })
    }

    /// Encode as 64 bytes of big-endian `r || s`.
    pub fn encode(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut encoded = [0u8; SIGNATURE_LENGTH];
        encoded.copy_from_slice(self.signature.to_bytes().as_slice());
        encoded
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex(&self.encode()))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex(&self.encode()))
    }
}

/// Shared-secret material produced by [PrivateKey::shared_secret].
///
/// Zeroized on drop; `Debug` shows `[REDACTED]`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_LENGTH]);

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret([REDACTED])")
    }
}
