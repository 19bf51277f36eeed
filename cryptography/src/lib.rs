//! Generate secp256k1 keys, sign arbitrary messages, and deterministically verify signatures.

pub mod secp256k1;

/// Produces signatures over messages that can be verified with a corresponding public key.
pub trait Signer: Send + Sync + Clone + 'static {
    /// The type of signature produced by this [Signer].
    type Signature: Clone + PartialEq + Send + Sync + 'static;

    /// The corresponding public key type.
    type PublicKey: Verifier<Signature = Self::Signature> + Clone + PartialEq + Send + Sync;

    /// Returns the public key corresponding to this [Signer].
    fn public_key(&self) -> Self::PublicKey;

    /// Sign a message with the given namespace.
    ///
    /// The message should not be hashed prior to calling this function; hashing
    /// is performed internally with a fixed digest.
    ///
    /// A namespace should be used to prevent cross-domain attacks (where a signature
    /// can be reused in a different context). It is prepended to the message so that
    /// a signature meant for one context cannot be used unexpectedly in another. See
    /// [signet_utils::union_unique] for details.
    fn sign(&self, namespace: Option<&[u8]>, msg: &[u8]) -> Self::Signature;
}

/// Verifies signatures over messages.
pub trait Verifier {
    /// The type of signature that this verifier can verify.
    type Signature;

    /// Verify that a signature is valid over a given message.
    ///
    /// The message should not be hashed prior to calling this function.
    ///
    /// Because the namespace is prepended to the message before signing, the
    /// namespace provided here must match the namespace provided during signing.
    fn verify(&self, namespace: Option<&[u8]>, msg: &[u8], sig: &Self::Signature) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secp256k1::PrivateKey;

    fn assert_sign_and_verify<S: Signer>(signer: S) {
        let namespace = Some(&b"test_namespace"[..]);
        let message = b"test_message";
        let signature = signer.sign(namespace, message);
        assert!(signer.public_key().verify(namespace, message, &signature));
    }

    fn assert_wrong_message_rejected<S: Signer>(signer: S) {
        let namespace = Some(&b"test_namespace"[..]);
        let signature = signer.sign(namespace, b"test_message");
        assert!(!signer
            .public_key()
            .verify(namespace, b"wrong_message", &signature));
    }

    fn assert_wrong_namespace_rejected<S: Signer>(signer: S) {
        let message = b"test_message";
        let signature = signer.sign(Some(&b"test_namespace"[..]), message);
        assert!(!signer
            .public_key()
            .verify(Some(&b"wrong_namespace"[..]), message, &signature));
    }

    fn assert_empty_vs_none_namespace<S: Signer>(signer: S) {
        let empty_namespace = Some(&b""[..]);
        let message = b"test_message";
        let signature = signer.sign(empty_namespace, message);
        let public_key = signer.public_key();
        assert!(public_key.verify(empty_namespace, message, &signature));
        assert!(!public_key.verify(None, message, &signature));
    }

    fn assert_signature_determinism<S: Signer>(signer_1: S, signer_2: S)
    where
        S::PublicKey: std::fmt::Debug,
    {
        let namespace = Some(&b"test_namespace"[..]);
        let message = b"test_message";
        let signature_1 = signer_1.sign(namespace, message);
        let signature_2 = signer_2.sign(namespace, message);
        assert_eq!(signer_1.public_key(), signer_2.public_key());
        assert!(signature_1 == signature_2);
    }

    fn assert_wrong_public_key_rejected<S: Signer>(signer: S, other: S) {
        let namespace = Some(&b"test_namespace"[..]);
        let message = b"test_message";
        let signature = signer.sign(namespace, message);
        assert!(!other.public_key().verify(namespace, message, &signature));
    }

    #[test]
    fn test_secp256k1_sign_and_verify() {
        assert_sign_and_verify(PrivateKey::from_seed(0));
    }

    #[test]
    fn test_secp256k1_sign_and_verify_wrong_message() {
        assert_wrong_message_rejected(PrivateKey::from_seed(0));
    }

    #[test]
    fn test_secp256k1_sign_and_verify_wrong_namespace() {
        assert_wrong_namespace_rejected(PrivateKey::from_seed(0));
    }

    #[test]
    fn test_secp256k1_empty_vs_none_namespace() {
        assert_empty_vs_none_namespace(PrivateKey::from_seed(0));
    }

    #[test]
    fn test_secp256k1_signature_determinism() {
        assert_signature_determinism(PrivateKey::from_seed(0), PrivateKey::from_seed(0));
    }

    #[test]
    fn test_secp256k1_invalid_signature_publickey_pair() {
        assert_wrong_public_key_rejected(PrivateKey::from_seed(0), PrivateKey::from_seed(1));
    }
}
