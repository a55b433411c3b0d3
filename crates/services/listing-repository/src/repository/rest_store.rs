//! Data API client (PostgREST over HTTP).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use common::{BackendConfig, RepositoryError, RepositoryResult, TokenSource};
use domain::{Listing, NewListing, Profile, UpdateProfile, LISTINGS_ORDER_COLUMN, LISTINGS_TABLE, PROFILES_TABLE};

use super::{ListingRepository, ProfileRepository};

const RETURN_REPRESENTATION: &str = "return=representation";

/// PostgREST error body.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Map an error response to a `RepositoryError`.
pub(crate) fn map_error(status: u16, body: &str) -> RepositoryError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed.message.unwrap_or_else(|| body.trim().to_string());

    match parsed.code.as_deref() {
        // insufficient_privilege: row-level security refused the write
        Some("42501") => return RepositoryError::Forbidden,
        // JWT expired or invalid
        Some("PGRST301") | Some("PGRST302") => return RepositoryError::Unauthorized,
        // single-object request matched no row
        Some("PGRST116") => return RepositoryError::NotFound,
        _ => {}
    }

    match StatusCode::from_u16(status) {
        Ok(StatusCode::UNAUTHORIZED) => RepositoryError::Unauthorized,
        Ok(StatusCode::FORBIDDEN) => RepositoryError::Forbidden,
        Ok(StatusCode::NOT_FOUND) => RepositoryError::NotFound,
        _ => RepositoryError::backend(status, message),
    }
}

fn eq(id: Uuid) -> String {
    format!("eq.{}", id)
}

fn newest_first() -> String {
    format!("{}.desc", LISTINGS_ORDER_COLUMN)
}

/// Listing and profile store backed by the hosted data API.
///
/// Requests carry the current session's access token when there is one,
/// so the backend's row-level security sees the signed-in user.
pub struct RestStore {
    http: reqwest::Client,
    config: BackendConfig,
    tokens: Arc<dyn TokenSource>,
}

impl RestStore {
    pub fn new(config: BackendConfig, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            tokens,
        }
    }

    async fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = self.config.rest_endpoint(table);
        debug!("{} {}", method, url);

        let token = match self.tokens.access_token().await {
            Some(token) => token,
            None => self.config.anon_key.clone(),
        };
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let err = map_error(status.as_u16(), &body);
        warn!(code = err.code(), status = status.as_u16(), "Data request failed");
        Err(err)
    }

    async fn select_listing(&self, id: Uuid) -> RepositoryResult<Option<Listing>> {
        let request = self
            .request(Method::GET, LISTINGS_TABLE)
            .await
            .query(&[("select", "*".to_string()), ("id", eq(id))]);

        let rows: Vec<Listing> = self.send(request).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl ListingRepository for RestStore {
    async fn select_all(&self) -> RepositoryResult<Vec<Listing>> {
        let request = self
            .request(Method::GET, LISTINGS_TABLE)
            .await
            .query(&[("select", "*".to_string()), ("order", newest_first())]);

        self.send(request).await
    }

    async fn select_by_owner(&self, owner: Uuid) -> RepositoryResult<Vec<Listing>> {
        let request = self.request(Method::GET, LISTINGS_TABLE).await.query(&[
            ("select", "*".to_string()),
            ("user_id", eq(owner)),
            ("order", newest_first()),
        ]);

        self.send(request).await
    }

    async fn insert(&self, listing: NewListing) -> RepositoryResult<Listing> {
        let request = self
            .request(Method::POST, LISTINGS_TABLE)
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&listing);

        let rows: Vec<Listing> = self.send(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepositoryError::Decode("insert returned no row".to_string()))
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> RepositoryResult<()> {
        let request = self
            .request(Method::DELETE, LISTINGS_TABLE)
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", eq(id)), ("user_id", eq(owner))]);

        let deleted: Vec<Listing> = self.send(request).await?;
        if !deleted.is_empty() {
            return Ok(());
        }

        // Nothing removed: tell a missing listing from someone else's
        match self.select_listing(id).await? {
            Some(_) => Err(RepositoryError::Forbidden),
            None => Err(RepositoryError::NotFound),
        }
    }
}

#[async_trait]
impl ProfileRepository for RestStore {
    async fn select_by_id(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        let request = self
            .request(Method::GET, PROFILES_TABLE)
            .await
            .query(&[("select", "*".to_string()), ("id", eq(id))]);

        let rows: Vec<Profile> = self.send(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn update(&self, id: Uuid, patch: UpdateProfile) -> RepositoryResult<Profile> {
        let request = self
            .request(Method::PATCH, PROFILES_TABLE)
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", eq(id))])
            .json(&patch);

        let rows: Vec<Profile> = self.send(request).await?;
        rows.into_iter().next().ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_status_codes() {
        assert_eq!(map_error(401, ""), RepositoryError::Unauthorized);
        assert_eq!(map_error(403, ""), RepositoryError::Forbidden);
        assert_eq!(map_error(404, ""), RepositoryError::NotFound);
    }

    #[test]
    fn test_map_postgrest_codes() {
        let rls = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"listings\""}"#;
        assert_eq!(map_error(400, rls), RepositoryError::Forbidden);

        let expired = r#"{"code":"PGRST301","details":null,"hint":null,"message":"JWT expired"}"#;
        assert_eq!(map_error(400, expired), RepositoryError::Unauthorized);
    }

    #[test]
    fn test_map_other_errors_keep_message() {
        let body = r#"{"code":"23502","details":null,"hint":null,"message":"null value in column \"title\" violates not-null constraint"}"#;
        assert_eq!(
            map_error(400, body),
            RepositoryError::backend(400, "null value in column \"title\" violates not-null constraint")
        );
        assert_eq!(map_error(502, "Bad Gateway"), RepositoryError::backend(502, "Bad Gateway"));
    }

    #[test]
    fn test_query_values() {
        let id = Uuid::nil();
        assert_eq!(eq(id), "eq.00000000-0000-0000-0000-000000000000");
        assert_eq!(newest_first(), "created_at.desc");
    }
}
