//! Credential parsing
//!
//! A credential is the server-issued token plus the absolute instant it
//! expires at. The instant is decoded from the token's `exp` claim exactly
//! once, when the token is accepted; afterwards it only travels through
//! storage as an RFC 3339 string and is never re-derived from the token.

use crate::error::{SessionError, SessionResult};
use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::fmt;

/// The part of the token payload the console reads
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Claims {
    /// Expiration, seconds since the Unix epoch. Fractional values are accepted.
    pub exp: f64,
}

impl Claims {
    /// Decode the payload (second) segment of a three-segment token
    pub fn decode(token: &str) -> SessionResult<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(SessionError::malformed(format!(
                "expected 3 dot-separated segments, found {}",
                segments.len()
            )));
        }

        let payload = segments[1].trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .or_else(|_| STANDARD_NO_PAD.decode(payload))
            .map_err(|e| SessionError::malformed(format!("payload is not base64: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| SessionError::malformed(format!("payload is not a claims object: {e}")))
    }

    /// Absolute expiration instant
    pub fn expires_at(&self) -> SessionResult<DateTime<Utc>> {
        if !self.exp.is_finite() {
            return Err(SessionError::malformed("exp is not a finite number"));
        }
        #[allow(clippy::cast_possible_truncation)]
        let millis = (self.exp * 1000.0).round() as i64;
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| SessionError::malformed(format!("exp {} is out of range", self.exp)))
    }
}

/// Token plus its fixed expiration instant
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: DateTime<Utc>,
}

impl Credential {
    /// Parse a freshly issued token. Expiry is not checked here.
    ///
    /// The token must be sendable as a bearer header value, so only visible
    /// ASCII is accepted.
    pub fn parse(token: impl Into<String>) -> SessionResult<Self> {
        let token = token.into();
        if let Some(byte) = token.bytes().find(|b| !b.is_ascii_graphic()) {
            return Err(SessionError::malformed(format!(
                "token contains byte {byte:#04x} not allowed in a header value"
            )));
        }
        let expires_at = Claims::decode(&token)?.expires_at()?;
        Ok(Self { token, expires_at })
    }

    /// Rebuild a credential from its persisted halves.
    ///
    /// The token is not decoded; `None` if the expiration is not a valid
    /// RFC 3339 instant.
    pub fn from_persisted(token: String, expiration: &str) -> Option<Self> {
        let expires_at = DateTime::parse_from_rfc3339(expiration)
            .ok()?
            .with_timezone(&Utc);
        Some(Self { token, expires_at })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Valid strictly before `expires_at`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Storage form of the expiration, e.g. `2024-05-01T12:00:00.000Z`
    pub fn expiration_string(&self) -> String {
        self.expires_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Build an unsigned three-segment token carrying `payload`
    pub(crate) fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{body}.signature")
    }

    pub(crate) fn token_expiring_at(instant: DateTime<Utc>) -> String {
        token_with_payload(&format!(r#"{{"sub":"operator","exp":{}}}"#, instant.timestamp()))
    }

    #[test]
    fn parses_exp_claim() {
        let exp = Utc.with_ymd_and_hms(2031, 3, 4, 5, 6, 7).unwrap();
        let credential = Credential::parse(token_expiring_at(exp)).unwrap();
        assert_eq!(credential.expires_at(), exp);
        assert_eq!(credential.expiration_string(), "2031-03-04T05:06:07.000Z");
    }

    #[test]
    fn accepts_fractional_exp() {
        let credential = Credential::parse(token_with_payload(r#"{"exp":1700000000.5}"#)).unwrap();
        assert_eq!(credential.expires_at().timestamp_millis(), 1_700_000_000_500);
    }

    #[test]
    fn accepts_padded_payload() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let body = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":10}"#);
        assert!(body.ends_with('='));
        assert!(Credential::parse(format!("{header}.{body}.sig")).is_ok());
    }

    #[test]
    fn rejects_wrong_segment_count() {
        for token in ["onlyonepart", "two.parts", "a.b.c.d", ""] {
            let err = Credential::parse(token).unwrap_err();
            assert!(err.is_malformed(), "{token:?} should be malformed");
        }
    }

    #[test]
    fn rejects_bytes_unusable_in_a_header() {
        let token = token_expiring_at(Utc::now());
        for bad in [
            format!("{token}\nx"),
            format!("{token}\r"),
            format!(" {token}"),
            format!("{token}\u{e9}"),
        ] {
            let err = Credential::parse(bad.clone()).unwrap_err();
            assert!(err.is_malformed(), "{bad:?} should be malformed");
        }
    }

    #[test]
    fn rejects_undecodable_payload() {
        assert!(Credential::parse("head.!!!.sig").unwrap_err().is_malformed());
        assert!(Credential::parse(token_with_payload("not json"))
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn rejects_missing_or_non_numeric_exp() {
        assert!(Credential::parse(token_with_payload(r#"{"sub":"x"}"#))
            .unwrap_err()
            .is_malformed());
        assert!(Credential::parse(token_with_payload(r#"{"exp":"soon"}"#))
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn rejects_out_of_range_exp() {
        assert!(Credential::parse(token_with_payload(r#"{"exp":1e300}"#))
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn persisted_form_round_trips_without_decoding_token() {
        let credential =
            Credential::from_persisted("abc.def.ghi".into(), "2030-01-01T00:00:00.000Z").unwrap();
        assert_eq!(credential.token(), "abc.def.ghi");
        assert_eq!(credential.expires_at(), Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        assert!(Credential::from_persisted("abc.def.ghi".into(), "tomorrow").is_none());
    }

    #[test]
    fn validity_is_strict() {
        let exp = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let credential = Credential::parse(token_expiring_at(exp)).unwrap();
        assert!(credential.is_valid_at(exp - chrono::Duration::seconds(1)));
        assert!(!credential.is_valid_at(exp));
    }

    #[test]
    fn debug_output_hides_token() {
        let credential =
            Credential::from_persisted("secret.token.value".into(), "2030-01-01T00:00:00Z")
                .unwrap();
        assert!(!format!("{credential:?}").contains("secret"));
    }
}
