use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::{check_string::DataCheckString, AuthError};

type HmacSha256 = Hmac<Sha256>;

/// Fixed HMAC key used to derive the per-bot secret key.
const WEB_APP_DATA: &[u8] = b"WebAppData";

/// The bot's long-lived token. Never printed, not even in `Debug`.
#[derive(Clone)]
pub struct BotToken(Arc<SecretString>);

impl BotToken {
    /// A blank token counts as not configured.
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AuthError::MissingBotToken);
        }
        Ok(Self(Arc::new(SecretString::from(raw))))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken([REDACTED])")
    }
}

/// Recomputes init-data signatures for one bot.
///
/// The secret key `HMAC_SHA256(key = "WebAppData", message = bot_token)` is
/// derived once at construction; it only depends on the immutable token.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret_key: [u8; 32],
}

impl SignatureVerifier {
    pub fn new(bot_token: &BotToken) -> Result<Self, AuthError> {
        let secret_key = hmac_sha256(WEB_APP_DATA, bot_token.expose().as_bytes())
            .ok_or(AuthError::MissingBotToken)?;
        Ok(Self { secret_key })
    }

    /// Lowercase hex `HMAC_SHA256(key = secret_key, message = check_string)`.
    pub fn sign(&self, check_string: &DataCheckString) -> Result<String, AuthError> {
        hmac_sha256(&self.secret_key, check_string.as_bytes())
            .map(hex::encode)
            .ok_or(AuthError::InvalidSignature)
    }

    pub fn verify(&self, check_string: &DataCheckString, provided: &str) -> Result<(), AuthError> {
        let expected = self.sign(check_string)?;
        let provided = provided.to_ascii_lowercase();
        // ct_eq on slices of different length is simply false.
        if expected.as_bytes().ct_eq(provided.as_bytes()).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidSignature)
        }
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Option<[u8; 32]> {
    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(message);
    Some(mac.finalize().into_bytes().into())
}
