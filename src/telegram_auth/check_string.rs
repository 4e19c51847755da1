use std::collections::BTreeMap;

use super::{init_data::ParsedInitData, AuthError};

/// The canonical string Telegram signed, plus the decoded parameter values.
///
/// Keys are ordered before any value is decoded; decoding happens once here
/// and later stages read the decoded values instead of decoding again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCheckString {
    value: String,
    decoded: BTreeMap<String, String>,
}

impl DataCheckString {
    pub fn build(parsed: &ParsedInitData) -> Result<Self, AuthError> {
        let mut decoded = BTreeMap::new();
        let mut lines = Vec::with_capacity(parsed.len());

        for (key, value) in parsed.params() {
            let value = percent_decode(value)?;
            lines.push(format!("{key}={value}"));
            decoded.insert(key.to_string(), value);
        }

        Ok(Self {
            value: lines.join("\n"),
            decoded,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    pub fn decoded(&self, key: &str) -> Option<&str> {
        self.decoded.get(key).map(String::as_str)
    }
}

// A value that does not decode cleanly cannot carry a valid signature.
fn percent_decode(value: &str) -> Result<String, AuthError> {
    if !has_well_formed_escapes(value) {
        return Err(AuthError::InvalidSignature);
    }
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| AuthError::InvalidSignature)
}

fn has_well_formed_escapes(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some(pair) if pair.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}
