use std::collections::BTreeMap;

use super::AuthError;

/// Name of the parameter carrying the hex signature.
pub const HASH_KEY: &str = "hash";

/// Init data split into its still-percent-encoded parameters.
///
/// Parameters are kept in a `BTreeMap`, so iteration is already in the
/// byte-wise key order Telegram signs. When a key repeats, the last
/// occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInitData {
    params: BTreeMap<String, String>,
    hash: String,
}

impl ParsedInitData {
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AuthError::InvalidSignature);
        }

        let mut params = BTreeMap::new();
        let mut hash = None;

        for segment in raw.split('&') {
            if segment.is_empty() {
                continue;
            }
            let Some((key, value)) = segment.split_once('=') else {
                if segment == HASH_KEY {
                    return Err(AuthError::InvalidSignature);
                }
                continue;
            };
            if key == HASH_KEY {
                hash = Some(value.to_string());
            } else {
                params.insert(key.to_string(), value.to_string());
            }
        }

        let hash = hash
            .filter(|h| !h.is_empty())
            .ok_or(AuthError::InvalidSignature)?;

        Ok(Self { params, hash })
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Every parameter except `hash`, in key order, values still encoded.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
