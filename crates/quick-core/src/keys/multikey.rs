//! Multibase-encoded, multicodec-tagged public keys ("Multikey"). The encoded form is the
//! canonical verification-method representation published in update credentials.

use multibase::Base;

use crate::error::Err;
use crate::keys::{KeyDescriptor, KeyType};
use crate::{tracerr, Result};

// Multicodec tags (unsigned varint encoded) for the key types recognized by this method.
// https://github.com/multiformats/multicodec
const ED25519_PUB: [u8; 2] = [0xed, 0x01];
const SECP256K1_PUB: [u8; 2] = [0xe7, 0x01];
const SECP256R1_PUB: [u8; 2] = [0x80, 0x24];
const X25519_PUB: [u8; 2] = [0xec, 0x01];
const BLS12381_G1_PUB: [u8; 2] = [0xea, 0x01];
const BLS12381_G2_PUB: [u8; 2] = [0xeb, 0x01];

/// Encode a public key to its canonical multikey representation: base58btc multibase of the
/// multicodec tag followed by the raw key bytes.
///
/// Only key types with a verification-method mapping can be encoded. Anything other than Ed25519
/// or secp256k1 is a hard error so a caller can never believe a key was added when it would be
/// omitted from the resolved document.
///
/// # Errors
///
/// * [`Err::UnsupportedKeyType`] - the key type has no verification-method mapping.
/// * Hex decoding error if the public key bytes are malformed.
pub fn encode(key: &KeyDescriptor) -> Result<String> {
    let codec = match key.type_ {
        KeyType::Ed25519 => ED25519_PUB,
        KeyType::Secp256k1 => SECP256K1_PUB,
        _ => tracerr!(
            Err::UnsupportedKeyType,
            "no verification-method mapping for key type {}",
            key.type_
        ),
    };
    let raw = hex::decode(&key.public_key_hex)?;
    let mut bytes = codec.to_vec();
    bytes.extend_from_slice(&raw);
    Ok(multibase::encode(Base::Base58Btc, bytes))
}

/// Decode a multikey to the raw public key bytes and the key type implied by its multicodec tag.
/// All key types recognized by the method can be decoded, so a resolver can classify keys it
/// would not itself have published.
///
/// # Errors
///
/// * [`Err::DecodeError`] - the input is not valid multibase or carries an unrecognized
/// multicodec tag.
pub fn decode(multikey: &str) -> Result<(Vec<u8>, KeyType)> {
    let (_, bytes) = match multibase::decode(multikey) {
        Ok(decoded) => decoded,
        Err(e) => tracerr!(Err::DecodeError, "invalid multibase: {}", e),
    };
    if bytes.len() < 2 {
        tracerr!(Err::DecodeError, "multikey too short: {} bytes", bytes.len());
    }
    let tag = [bytes[0], bytes[1]];
    let type_ = match tag {
        ED25519_PUB => KeyType::Ed25519,
        SECP256K1_PUB => KeyType::Secp256k1,
        SECP256R1_PUB => KeyType::Secp256r1,
        X25519_PUB => KeyType::X25519,
        BLS12381_G1_PUB => KeyType::Bls12381G1,
        BLS12381_G2_PUB => KeyType::Bls12381G2,
        _ => tracerr!(
            Err::DecodeError,
            "unrecognized multicodec tag: 0x{:02x}{:02x}",
            tag[0],
            tag[1]
        ),
    };
    Ok((bytes[2..].to_vec(), type_))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{ED25519_HEX, SECP256K1_HEX};

    #[test]
    fn round_trip_ed25519() {
        let key = KeyDescriptor {
            kid: "key-1".to_string(),
            type_: KeyType::Ed25519,
            public_key_hex: ED25519_HEX.to_string(),
        };
        let multikey = encode(&key).expect("failed to encode");
        assert!(multikey.starts_with("z6Mk"));

        let (raw, type_) = decode(&multikey).expect("failed to decode");
        assert_eq!(raw, hex::decode(ED25519_HEX).expect("invalid hex"));
        assert_eq!(type_, KeyType::Ed25519);
    }

    #[test]
    fn round_trip_secp256k1() {
        let key = KeyDescriptor {
            kid: "key-2".to_string(),
            type_: KeyType::Secp256k1,
            public_key_hex: SECP256K1_HEX.to_string(),
        };
        let multikey = encode(&key).expect("failed to encode");
        assert!(multikey.starts_with("zQ3s"));

        let (raw, type_) = decode(&multikey).expect("failed to decode");
        assert_eq!(raw, hex::decode(SECP256K1_HEX).expect("invalid hex"));
        assert_eq!(type_, KeyType::Secp256k1);
    }

    #[test]
    fn unmapped_key_types() {
        for type_ in [
            KeyType::Secp256r1,
            KeyType::X25519,
            KeyType::Bls12381G1,
            KeyType::Bls12381G2,
        ] {
            let key = KeyDescriptor {
                kid: "key-x".to_string(),
                type_,
                public_key_hex: ED25519_HEX.to_string(),
            };
            let err = encode(&key).expect_err("expected error");
            assert!(err.is(Err::UnsupportedKeyType));
        }
    }

    #[test]
    fn malformed_multibase() {
        let err = decode("not-multibase").expect_err("expected error");
        assert!(err.is(Err::DecodeError));
    }

    #[test]
    fn unknown_codec() {
        // base58btc of a payload with an unassigned 2-byte tag.
        let encoded = multibase::encode(Base::Base58Btc, [0x00u8, 0x00, 0x01, 0x02]);
        let err = decode(&encoded).expect_err("expected error");
        assert!(err.is(Err::DecodeError));
    }
}
