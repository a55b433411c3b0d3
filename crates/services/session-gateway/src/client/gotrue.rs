//! HTTP client for the hosted auth provider (GoTrue API).

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use common::{AuthError, AuthResult, BackendConfig};
use domain::{Session, SessionUser, SignUpOutcome, UserMetadata};

use super::AuthProvider;

/// Token grant response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: SessionUser,
}

impl TokenResponse {
    pub(crate) fn into_session(self) -> Session {
        let now = Utc::now();
        let expires_at = self
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .or_else(|| {
                Duration::try_seconds(self.expires_in.unwrap_or(3600))
                    .and_then(|ttl| now.checked_add_signed(ttl))
            })
            .unwrap_or_else(|| now + Duration::hours(1));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Sign-up returns a token response when the account is confirmed
/// immediately, and the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignUpResponse {
    Session(TokenResponse),
    User(SessionUser),
}

impl From<SignUpResponse> for SignUpOutcome {
    fn from(response: SignUpResponse) -> Self {
        match response {
            SignUpResponse::Session(token) => SignUpOutcome::Confirmed(token.into_session()),
            SignUpResponse::User(user) => SignUpOutcome::PendingConfirmation { user },
        }
    }
}

/// Error body. Older deployments send `error`/`error_description`,
/// newer ones `error_code`/`msg`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a UserMetadata,
}

/// Map an error response to an `AuthError`.
pub(crate) fn map_error(status: u16, body: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = parsed
        .error_code
        .clone()
        .or_else(|| parsed.error.clone())
        .unwrap_or_default();
    let message = parsed
        .msg
        .or(parsed.error_description)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| body.trim().to_string());
    let lowered = message.to_lowercase();

    match code.as_str() {
        "invalid_credentials" => return AuthError::InvalidCredentials,
        "email_not_confirmed" => return AuthError::EmailNotConfirmed,
        "user_already_exists" | "email_exists" => return AuthError::AlreadyRegistered,
        "weak_password" => return AuthError::WeakPassword(message),
        "over_request_rate_limit" | "over_email_send_rate_limit" => {
            return AuthError::TooManyRequests
        }
        "refresh_token_not_found" | "refresh_token_already_used" | "session_not_found" => {
            return AuthError::SessionExpired
        }
        _ => {}
    }

    if lowered.contains("invalid login credentials") {
        AuthError::InvalidCredentials
    } else if lowered.contains("email not confirmed") {
        AuthError::EmailNotConfirmed
    } else if lowered.contains("already registered") {
        AuthError::AlreadyRegistered
    } else if lowered.contains("invalid refresh token") {
        AuthError::SessionExpired
    } else if status == StatusCode::TOO_MANY_REQUESTS.as_u16() {
        AuthError::TooManyRequests
    } else {
        AuthError::provider(status, message)
    }
}

/// GoTrue HTTP client.
#[derive(Clone)]
pub struct GoTrueClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl GoTrueClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Reuse an existing HTTP client (shares its connection pool)
    pub fn with_client(http: reqwest::Client, config: BackendConfig) -> Self {
        Self { http, config }
    }

    fn request(&self, method: reqwest::Method, path: &str, bearer: Option<&str>) -> reqwest::RequestBuilder {
        let url = self.config.auth_endpoint(path);
        debug!("{} {}", method, url);

        let token = bearer.unwrap_or(&self.config.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> AuthResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = map_error(status.as_u16(), &body);
        warn!(code = err.code(), status = status.as_u16(), "Auth request failed");
        Err(err)
    }
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let request = self
            .request(reqwest::Method::POST, "token?grant_type=password", None)
            .json(&PasswordGrant { email, password });

        let token: TokenResponse = self.send(request).await?.json().await?;
        Ok(token.into_session())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> AuthResult<SignUpOutcome> {
        let request = self
            .request(reqwest::Method::POST, "signup", None)
            .json(&SignUpRequest {
                email,
                password,
                data: metadata,
            });

        let response: SignUpResponse = self.send(request).await?.json().await?;
        Ok(response.into())
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<Session> {
        let request = self
            .request(reqwest::Method::POST, "token?grant_type=refresh_token", None)
            .json(&RefreshGrant { refresh_token });

        let token: TokenResponse = self.send(request).await?.json().await?;
        Ok(token.into_session())
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let request = self.request(reqwest::Method::POST, "logout", Some(access_token));
        self.send(request).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> AuthResult<SessionUser> {
        let request = self.request(reqwest::Method::GET, "user", Some(access_token));
        let user: SessionUser = self.send(request).await?.json().await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_legacy_invalid_grant() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(map_error(400, body), AuthError::InvalidCredentials);
    }

    #[test]
    fn test_map_error_codes() {
        let body = r#"{"code":400,"error_code":"email_not_confirmed","msg":"Email not confirmed"}"#;
        assert_eq!(map_error(400, body), AuthError::EmailNotConfirmed);

        let body = r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#;
        assert_eq!(map_error(422, body), AuthError::AlreadyRegistered);

        let body = r#"{"code":422,"error_code":"weak_password","msg":"Password should be at least 6 characters."}"#;
        assert_eq!(
            map_error(422, body),
            AuthError::WeakPassword("Password should be at least 6 characters.".to_string())
        );
    }

    #[test]
    fn test_map_message_fallbacks() {
        assert_eq!(
            map_error(400, r#"{"msg":"User already registered"}"#),
            AuthError::AlreadyRegistered
        );
        assert_eq!(
            map_error(400, r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token: Refresh Token Not Found"}"#),
            AuthError::SessionExpired
        );
        assert_eq!(map_error(429, "slow down"), AuthError::TooManyRequests);
    }

    #[test]
    fn test_map_unknown_error_keeps_message() {
        assert_eq!(
            map_error(500, "upstream exploded"),
            AuthError::provider(500, "upstream exploded")
        );
        assert_eq!(
            map_error(422, r#"{"code":422,"msg":"Signups not allowed for this instance"}"#),
            AuthError::provider(422, "Signups not allowed for this instance")
        );
    }

    #[test]
    fn test_token_response_into_session() {
        let json = r#"{
            "access_token": "at",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1714557600,
            "refresh_token": "rt",
            "user": {
                "id": "1f0c6a52-3a3e-4c55-9a0f-5b3e0d7a1c02",
                "email": "ada@example.com",
                "user_metadata": { "full_name": "Ada" }
            }
        }"#;

        let session = serde_json::from_str::<TokenResponse>(json).unwrap().into_session();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.expires_at.timestamp(), 1714557600);
        assert_eq!(session.user.display_name(), "Ada");
    }

    #[test]
    fn test_sign_up_response_without_session_is_pending() {
        let json = r#"{
            "id": "1f0c6a52-3a3e-4c55-9a0f-5b3e0d7a1c02",
            "email": "ada@example.com",
            "user_metadata": { "full_name": "Ada" },
            "confirmation_sent_at": "2024-05-01T10:00:00Z"
        }"#;

        let outcome: SignUpOutcome = serde_json::from_str::<SignUpResponse>(json).unwrap().into();
        assert!(matches!(outcome, SignUpOutcome::PendingConfirmation { .. }));
    }
}
