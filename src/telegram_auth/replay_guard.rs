use super::AuthError;

/// How old `auth_date` may be, inclusive.
pub const AUTH_DATE_TOLERANCE_SECS: i64 = 86_400;

/// Accepts `auth_date` iff `0 <= now - auth_date <= AUTH_DATE_TOLERANCE_SECS`.
///
/// Must only run on init data whose signature already checked out.
pub fn check_auth_date(auth_date: Option<&str>, now: i64) -> Result<i64, AuthError> {
    let auth_date = auth_date
        .filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or(AuthError::ExpiredAuthData)?;

    match now.checked_sub(auth_date) {
        Some(age) if (0..=AUTH_DATE_TOLERANCE_SECS).contains(&age) => Ok(auth_date),
        _ => Err(AuthError::ExpiredAuthData),
    }
}
