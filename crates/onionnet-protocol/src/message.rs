//! Onion message wire format
//!
//! An onion message is the concatenation of a fixed-length key segment and a
//! variable-length payload segment. Peeling one layer recovers the next-hop
//! destination from a fixed-width decimal field and leaves the rest of the
//! plaintext opaque: it is either another onion message or the final text,
//! and a relay never needs to know which.

use onionnet_crypto::aead::{sym_decrypt, sym_encrypt, SymmetricKey};
use onionnet_crypto::asymmetric::{rsa_decrypt, rsa_encrypt};
use onionnet_crypto::keys::{PrivateKey, PublicKey};
use onionnet_crypto::RSA_BLOCK_ENCODED_LEN;

use crate::error::{ProtocolError, Result};

/// Length of the key segment at the front of every onion message
pub const KEY_SEGMENT_LEN: usize = RSA_BLOCK_ENCODED_LEN;

/// Width of the decimal destination field at the front of a decrypted layer
pub const DESTINATION_WIDTH: usize = 10;

/// Largest destination the field can carry
pub const MAX_DESTINATION: u64 = 9_999_999_999;

/// Result of removing one layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeeledLayer {
    /// Where the payload goes next
    pub destination: u64,
    /// Remaining payload, forwarded as-is
    pub payload: String,
}

/// Encode a destination as a zero-padded fixed-width field
pub fn encode_destination(destination: u64) -> Result<String> {
    if destination > MAX_DESTINATION {
        return Err(ProtocolError::DestinationOutOfRange(destination));
    }
    Ok(format!("{:0width$}", destination, width = DESTINATION_WIDTH))
}

/// Parse a fixed-width destination field
///
/// Surrounding whitespace and leading zeros are padding. Anything else that
/// is not a decimal digit makes the field malformed.
pub fn decode_destination(field: &str) -> Result<u64> {
    let digits = field.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProtocolError::MalformedMessage(format!(
            "invalid destination field {:?}",
            field
        )));
    }

    digits
        .parse()
        .map_err(|_| ProtocolError::MalformedMessage(format!("invalid destination field {:?}", field)))
}

/// Split a decrypted layer into its destination field and payload
pub fn split_layer(plaintext: &str) -> Result<PeeledLayer> {
    let boundary = match plaintext.char_indices().nth(DESTINATION_WIDTH) {
        Some((index, _)) => index,
        None if plaintext.chars().count() == DESTINATION_WIDTH => plaintext.len(),
        None => {
            return Err(ProtocolError::MalformedMessage(format!(
                "layer shorter than destination field ({} chars)",
                plaintext.chars().count()
            )))
        }
    };

    let (field, payload) = plaintext.split_at(boundary);
    Ok(PeeledLayer {
        destination: decode_destination(field)?,
        payload: payload.to_string(),
    })
}

/// Split an onion message into its key segment and payload segment
pub fn split_message(message: &str) -> Result<(&str, &str)> {
    if message.len() < KEY_SEGMENT_LEN {
        return Err(ProtocolError::MalformedMessage(format!(
            "message shorter than key segment: {} < {}",
            message.len(),
            KEY_SEGMENT_LEN
        )));
    }
    if !message.is_char_boundary(KEY_SEGMENT_LEN) {
        return Err(ProtocolError::MalformedMessage(
            "key segment is not ASCII".to_string(),
        ));
    }

    Ok(message.split_at(KEY_SEGMENT_LEN))
}

/// Remove the outer layer of `message` with the relay's private key
pub fn peel_layer(message: &str, key: &PrivateKey) -> Result<PeeledLayer> {
    let (key_segment, payload_segment) = split_message(message)?;

    let exported = rsa_decrypt(key_segment, key).map_err(ProtocolError::Decryption)?;
    let layer_key = SymmetricKey::import(&exported).map_err(ProtocolError::Decryption)?;
    let plaintext = sym_decrypt(&layer_key, payload_segment).map_err(ProtocolError::Decryption)?;

    split_layer(&plaintext)
}

/// Wrap `payload` addressed to `destination` in one layer for the holder of
/// `key`
pub fn seal_layer(key: &PublicKey, destination: u64, payload: &str) -> Result<String> {
    let mut plaintext = encode_destination(destination)?;
    plaintext.push_str(payload);

    let layer_key = SymmetricKey::generate();
    let payload_segment = sym_encrypt(&layer_key, &plaintext)?;
    let key_segment = rsa_encrypt(&layer_key.export(), key)?;

    Ok(key_segment + &payload_segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use onionnet_crypto::keys::KeyPair;
    use proptest::prelude::*;

    #[test]
    fn test_encode_destination_width() {
        assert_eq!(encode_destination(0).unwrap(), "0000000000");
        assert_eq!(encode_destination(4001).unwrap(), "0000004001");
        assert_eq!(encode_destination(MAX_DESTINATION).unwrap(), "9999999999");
        assert!(matches!(
            encode_destination(MAX_DESTINATION + 1),
            Err(ProtocolError::DestinationOutOfRange(_))
        ));
    }

    #[test]
    fn test_decode_destination_padding() {
        assert_eq!(decode_destination("0000004001").unwrap(), 4001);
        assert_eq!(decode_destination("      4001").unwrap(), 4001);
        assert_eq!(decode_destination("4001      ").unwrap(), 4001);
        assert_eq!(decode_destination("0000000000").unwrap(), 0);
    }

    #[test]
    fn test_decode_destination_rejects_garbage() {
        for field in ["          ", "00000abc01", "-000004001", "+000004001", "40 01"] {
            assert!(
                matches!(decode_destination(field), Err(ProtocolError::MalformedMessage(_))),
                "accepted {:?}",
                field
            );
        }
    }

    #[test]
    fn test_split_layer_boundaries() {
        let exact = split_layer("0000003000").unwrap();
        assert_eq!(exact.destination, 3000);
        assert_eq!(exact.payload, "");

        let one_more = split_layer("0000003000x").unwrap();
        assert_eq!(one_more.payload, "x");

        assert!(matches!(
            split_layer("000000300"),
            Err(ProtocolError::MalformedMessage(_))
        ));
        assert!(matches!(split_layer(""), Err(ProtocolError::MalformedMessage(_))));
    }

    #[test]
    fn test_split_layer_multibyte_payload() {
        let layer = split_layer("0000003000héllo").unwrap();
        assert_eq!(layer.payload, "héllo");
    }

    #[test]
    fn test_split_message_too_short() {
        let short = "A".repeat(KEY_SEGMENT_LEN - 1);
        assert!(matches!(
            split_message(&short),
            Err(ProtocolError::MalformedMessage(_))
        ));

        let exact = "A".repeat(KEY_SEGMENT_LEN);
        let (key, rest) = split_message(&exact).unwrap();
        assert_eq!(key.len(), KEY_SEGMENT_LEN);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_seal_then_peel() {
        let pair = KeyPair::generate().unwrap();
        let sealed = seal_layer(&pair.public, 3001, "hello").unwrap();

        let peeled = peel_layer(&sealed, &pair.private).unwrap();
        assert_eq!(peeled, PeeledLayer { destination: 3001, payload: "hello".to_string() });
    }

    #[test]
    fn test_peel_with_wrong_key() {
        let alice = KeyPair::generate().unwrap();
        let mallory = KeyPair::generate().unwrap();
        let sealed = seal_layer(&alice.public, 3001, "hello").unwrap();

        assert!(matches!(
            peel_layer(&sealed, &mallory.private),
            Err(ProtocolError::Decryption(_))
        ));
    }

    #[test]
    fn test_peel_tampered_payload() {
        let pair = KeyPair::generate().unwrap();
        let mut sealed = seal_layer(&pair.public, 3001, "hello").unwrap();
        sealed.truncate(sealed.len() - 4);
        sealed.push_str("AAAA");

        assert!(matches!(
            peel_layer(&sealed, &pair.private),
            Err(ProtocolError::Decryption(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_destination_field_roundtrip(dest in 0u64..=MAX_DESTINATION, payload in ".{0,64}") {
            let mut layer = encode_destination(dest).unwrap();
            prop_assert_eq!(layer.chars().count(), DESTINATION_WIDTH);
            layer.push_str(&payload);

            let peeled = split_layer(&layer).unwrap();
            prop_assert_eq!(peeled.destination, dest);
            prop_assert_eq!(peeled.payload, payload);
        }
    }
}
