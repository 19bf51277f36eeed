#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use signet_cryptography::secp256k1::{PrivateKey, PublicKey, Signature};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    private_key: Vec<u8>,
    public_key: Vec<u8>,
    signature: Vec<u8>,
}

fn fuzz(input: FuzzInput) {
    if let Ok(key) = PrivateKey::decode(&input.private_key) {
        assert_eq!(&input.private_key[..], &key.encode()[..]);
    }
    if let Ok(key) = PublicKey::decode(&input.public_key) {
        // The canonical encoding always redecodes to the same key.
        let redecoded = PublicKey::decode(&key.encode()).unwrap();
        assert_eq!(key, redecoded);
    }
    if let Ok(signature) = Signature::decode(&input.signature) {
        assert_eq!(&input.signature[..], &signature.encode()[..]);
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
