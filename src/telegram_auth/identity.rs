use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuthError;

/// The launching user, decoded from the `user` init-data parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TelegramIdentity {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bot: Option<bool>,
}

/// Decodes the already percent-decoded `user` value.
pub fn extract_user(user: Option<&str>) -> Result<TelegramIdentity, AuthError> {
    let payload = user
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingUserData)?;

    serde_json::from_str(payload).map_err(|_| AuthError::InvalidUserData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_payload() {
        let user = extract_user(Some(
            r#"{"id":123456789,"first_name":"Test","last_name":"User","username":"testuser","language_code":"en","is_premium":true,"allows_write_to_pm":true,"photo_url":"https://t.me/i/userpic/320/x.jpg"}"#,
        ))
        .unwrap();
        assert_eq!(user.id, 123456789);
        assert_eq!(user.username.as_deref(), Some("testuser"));
        assert_eq!(user.language_code.as_deref(), Some("en"));
        assert_eq!(user.is_bot, None);
    }

    #[test]
    fn passes_unicode_through() {
        let user = extract_user(Some(r#"{"id":7,"first_name":"Ёжик 🦔 <&>"}"#)).unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Ёжик 🦔 <&>"));
    }

    #[test]
    fn absent_or_blank_is_missing() {
        assert_eq!(extract_user(None), Err(AuthError::MissingUserData));
        assert_eq!(extract_user(Some("")), Err(AuthError::MissingUserData));
        assert_eq!(extract_user(Some("  ")), Err(AuthError::MissingUserData));
    }

    #[test]
    fn malformed_payload_is_invalid() {
        for raw in [
            "not-json",
            "[]",
            "123",
            r#"{"username":"noid"}"#,
            r#"{"id":"123"}"#,
            r#"{"id":1.5}"#,
            r#"{"id":null}"#,
            r#"{"id":99999999999999999999}"#,
        ] {
            assert_eq!(extract_user(Some(raw)), Err(AuthError::InvalidUserData), "{raw}");
        }
    }

    #[test]
    fn negative_and_large_ids_fit() {
        assert_eq!(extract_user(Some(r#"{"id":-1001234}"#)).unwrap().id, -1001234);
        assert_eq!(
            extract_user(Some(r#"{"id":9007199254740993}"#)).unwrap().id,
            9007199254740993
        );
    }
}
