// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions between text, structured values, and the raw bytes the
//! cipher and key deriver operate on.

use coffer_core::CofferError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use zeroize::Zeroizing;

/// UTF-8 encode `text`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Decode UTF-8 `bytes` into an owned string.
pub fn decode_text(bytes: Vec<u8>) -> Result<String, CofferError> {
    Ok(String::from_utf8(bytes)?)
}

/// Canonical byte form of a value: compact JSON.
///
/// The buffer is zeroized on drop since it usually holds a secret payload.
pub fn encode_json<T: Serialize>(value: &T) -> Result<Zeroizing<Vec<u8>>, CofferError> {
    Ok(Zeroizing::new(serde_json::to_vec(value)?))
}

/// Parse a value from its canonical byte form.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CofferError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn text_round_trips_multibyte_characters() {
        let text = "pässwörd 🔑";
        let bytes = encode_text(text);
        assert_eq!(bytes.len(), text.len());
        assert_eq!(decode_text(bytes).unwrap(), text);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let err = decode_text(vec![0x66, 0x6f, 0xff]).unwrap_err();
        assert!(matches!(err, CofferError::InvalidUtf8(_)));
    }

    #[test]
    fn json_encoding_is_compact_and_stable() {
        let mut value = BTreeMap::new();
        value.insert("b", 2);
        value.insert("a", 1);
        let bytes = encode_json(&value).unwrap();
        assert_eq!(bytes.as_slice(), br#"{"a":1,"b":2}"#);

        let back: BTreeMap<String, i32> = decode_json(&bytes).unwrap();
        assert_eq!(back.get("a"), Some(&1));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = decode_json::<BTreeMap<String, i32>>(b"{not json").unwrap_err();
        assert!(matches!(err, CofferError::Serialization(_)));
    }
}
