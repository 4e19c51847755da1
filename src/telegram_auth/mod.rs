//! Telegram Mini App init-data authentication.
//!
//! See <https://core.telegram.org/bots/webapps#validating-data-received-via-the-mini-app>
//!
//! A request moves through a fixed, short-circuiting sequence:
//! parse → build data-check-string → verify signature → check `auth_date`
//! → decode `user`. Nothing is retained between requests except the secret
//! key derived from the bot token.

pub mod check_string;
pub mod identity;
pub mod init_data;
pub mod replay_guard;
pub mod signature;

use std::fmt;

pub use check_string::DataCheckString;
pub use identity::{extract_user, TelegramIdentity};
pub use init_data::ParsedInitData;
pub use replay_guard::{check_auth_date, AUTH_DATE_TOLERANCE_SECS};
pub use signature::{BotToken, SignatureVerifier};

const AUTH_DATE_KEY: &str = "auth_date";
const USER_KEY: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Telegram init data is missing")]
    MissingInitData,
    #[error("Telegram init data signature is invalid")]
    InvalidSignature,
    #[error("Telegram init data has expired")]
    ExpiredAuthData,
    #[error("Telegram user data is missing")]
    MissingUserData,
    #[error("Telegram user data is invalid")]
    InvalidUserData,
    #[error("Telegram bot token is not configured")]
    MissingBotToken,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInitData => "MISSING_INIT_DATA",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::ExpiredAuthData => "EXPIRED_AUTH_DATA",
            Self::MissingUserData => "MISSING_USER_DATA",
            Self::InvalidUserData => "INVALID_USER_DATA",
            Self::MissingBotToken => "MISSING_BOT_TOKEN",
        }
    }

    /// Server misconfiguration rather than a problem with the caller's data.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::MissingBotToken)
    }

    /// Where in the pipeline this error stops a request.
    pub fn stage(&self) -> AuthStage {
        match self {
            Self::MissingInitData | Self::MissingBotToken => AuthStage::Start,
            Self::InvalidSignature => AuthStage::SignatureChecked,
            Self::ExpiredAuthData => AuthStage::TimestampChecked,
            Self::MissingUserData | Self::InvalidUserData => AuthStage::UserExtracted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Start,
    ParamsParsed,
    SignatureChecked,
    TimestampChecked,
    UserExtracted,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::ParamsParsed => "params_parsed",
            Self::SignatureChecked => "signature_checked",
            Self::TimestampChecked => "timestamp_checked",
            Self::UserExtracted => "user_extracted",
        })
    }
}

/// A request whose init data passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub user_id: i64,
    pub identity: TelegramIdentity,
    pub auth_date: i64,
    pub raw_init_data: String,
}

pub type AuthDecision = Result<Authenticated, AuthError>;

#[derive(Debug, Clone)]
pub struct InitDataAuthenticator {
    verifier: SignatureVerifier,
}

impl InitDataAuthenticator {
    pub fn new(bot_token: &BotToken) -> Result<Self, AuthError> {
        Ok(Self {
            verifier: SignatureVerifier::new(bot_token)?,
        })
    }

    pub fn authenticate(&self, raw: Option<&str>) -> AuthDecision {
        self.authenticate_at(raw, crate::utils::time::unix_timestamp())
    }

    pub fn authenticate_at(&self, raw: Option<&str>, now: i64) -> AuthDecision {
        let raw = raw
            .filter(|r| !r.trim().is_empty())
            .ok_or(AuthError::MissingInitData)?;

        let parsed = ParsedInitData::parse(raw)?;
        let check_string = DataCheckString::build(&parsed)?;
        self.verifier.verify(&check_string, parsed.hash())?;

        let auth_date = check_auth_date(check_string.decoded(AUTH_DATE_KEY), now)?;
        let identity = extract_user(check_string.decoded(USER_KEY))?;

        Ok(Authenticated {
            user_id: identity.id,
            identity,
            auth_date,
            raw_init_data: raw.to_string(),
        })
    }
}
