//! Client for the remote identity/profile backend.
//!
//! Thin request/response wrappers over the five identity operations: ability
//! catalog fetch, ability submission, own-abilities fetch, profile update and
//! consent submission, plus the current-profile fetch. Authenticated requests
//! carry a bearer token; if no token is set the header is simply omitted;
//! there is no local enforcement of auth.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};

/// An entry in the ability catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    /// Backend identifier.
    pub id: String,
    /// Stable short code.
    pub code: String,
    /// Human-readable description.
    pub description: String,
}

/// A self-assessed rating for one ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRating {
    /// The ability being rated.
    pub ability_id: String,
    /// Self-assessed level.
    pub level: u8,
}

/// Body of an ability submission.
#[derive(Debug, Serialize)]
struct AbilitySubmission<'a> {
    abilities: &'a [AbilityRating],
}

/// Reply to an ability submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReply {
    /// Optional confirmation message.
    pub message: Option<String>,
}

/// A rated ability as returned for the current rescuer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedAbility {
    /// The ability identifier.
    pub ability_id: String,
    /// Stable short code.
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Self-assessed level.
    pub level: u8,
}

/// The current rescuer's submitted abilities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescuerAbilities {
    /// The owning user.
    pub user_id: String,
    /// The rated abilities.
    pub abilities: Vec<RatedAbility>,
}

/// Body of a rescuer profile update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// Ward.
    pub ward: String,
    /// City or province.
    pub city: String,
    /// Latitude of the rescuer's base location.
    pub latitude: f64,
    /// Longitude of the rescuer's base location.
    pub longitude: f64,
}

/// The four consent flags a rescuer must answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
    /// Accepts the terms of service.
    pub agree_terms: bool,
    /// Allows sharing profile data with coordinating organizations.
    pub agree_data_sharing: bool,
    /// Allows location tracking during active rescues.
    pub agree_location_tracking: bool,
    /// Accepts emergency notifications.
    pub agree_notifications: bool,
}

/// A rescuer profile record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Backend identifier.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Given name, once submitted.
    pub first_name: Option<String>,
    /// Family name, once submitted.
    pub last_name: Option<String>,
    /// Contact phone number, once submitted.
    pub phone: Option<String>,
    /// Street address, once submitted.
    pub address: Option<String>,
    /// Ward, once submitted.
    pub ward: Option<String>,
    /// City or province, once submitted.
    pub city: Option<String>,
    /// Latitude of the rescuer's base location.
    pub latitude: Option<f64>,
    /// Longitude of the rescuer's base location.
    pub longitude: Option<f64>,
}

/// Client for the identity backend.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl IdentityClient {
    /// Create a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token for authenticated requests.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build a request for `path`, attaching the bearer token when present.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!("{method} {url}");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Parse a response, mapping non-success statuses into structured errors.
    async fn parse<R: DeserializeOwned>(response: Response) -> RemoteResult<R> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<R>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(RemoteError::from_status(status, &body))
        }
    }

    /// Fetch the ability catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn abilities(&self) -> RemoteResult<Vec<Ability>> {
        let response = self
            .request(Method::GET, "/identity/abilities")
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Submit the rescuer's self-assessed ability ratings.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Validation`] when the backend rejects specific
    /// fields, or a transport/status error otherwise.
    pub async fn submit_abilities(&self, ratings: &[AbilityRating]) -> RemoteResult<SubmitReply> {
        let response = self
            .request(Method::POST, "/identity/abilities/rescuer")
            .json(&AbilitySubmission { abilities: ratings })
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Fetch the current rescuer's submitted abilities.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn my_abilities(&self) -> RemoteResult<RescuerAbilities> {
        let response = self
            .request(Method::GET, "/identity/abilities/rescuer/me")
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Update the rescuer profile.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Validation`] when the backend rejects specific
    /// fields, or a transport/status error otherwise.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> RemoteResult<Profile> {
        let response = self
            .request(Method::PUT, "/identity/user/rescuer/profile")
            .json(update)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Submit the rescuer's consent flags.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn submit_consent(&self, consent: &Consent) -> RemoteResult<Profile> {
        let response = self
            .request(Method::POST, "/identity/user/rescuer/consent")
            .json(consent)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Fetch the current profile.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn me(&self) -> RemoteResult<Profile> {
        let response = self
            .request(Method::GET, "/identity/user/me")
            .send()
            .await?;
        Self::parse(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn profile_body() -> &'static str {
        r#"{
            "id": "u1",
            "email": "rescuer@example.com",
            "firstName": "Minh",
            "lastName": "Tran",
            "phone": "0901234567",
            "address": "12 Le Loi",
            "ward": "Thuan Phuoc",
            "city": "Da Nang",
            "latitude": 16.07,
            "longitude": 108.22
        }"#
    }

    #[tokio::test]
    async fn test_abilities_fetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/identity/abilities")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"a1","code":"SWIM","description":"Can swim in floodwater"}]"#)
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let abilities = client.abilities().await.unwrap();

        assert_eq!(abilities.len(), 1);
        assert_eq!(abilities[0].code, "SWIM");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/identity/user/me")
            .match_header("authorization", "Bearer tok-123")
            .with_status(200)
            .with_body(profile_body())
            .create_async()
            .await;

        let client = IdentityClient::new(server.url()).with_token("tok-123");
        let profile = client.me().await.unwrap();

        assert_eq!(profile.email, "rescuer@example.com");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_token_omits_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/identity/user/me")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(profile_body())
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        client.me().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_abilities_body_shape() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/identity/abilities/rescuer")
            .match_body(Matcher::Json(serde_json::json!({
                "abilities": [{"abilityId": "a1", "level": 3}]
            })))
            .with_status(200)
            .with_body(r#"{"message":"saved"}"#)
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let reply = client
            .submit_abilities(&[AbilityRating {
                ability_id: "a1".to_string(),
                level: 3,
            }])
            .await
            .unwrap();

        assert_eq!(reply.message.as_deref(), Some("saved"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_my_abilities() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/identity/abilities/rescuer/me")
            .with_status(200)
            .with_body(
                r#"{
                    "userId": "u1",
                    "abilities": [
                        {"abilityId":"a1","code":"SWIM","description":"Swimming","level":4}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let mine = client.my_abilities().await.unwrap();

        assert_eq!(mine.user_id, "u1");
        assert_eq!(mine.abilities[0].level, 4);
    }

    #[tokio::test]
    async fn test_update_profile_validation_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/identity/user/rescuer/profile")
            .with_status(422)
            .with_body(r#"{"message":"invalid profile","errors":{"phone":["too short"]}}"#)
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let update = ProfileUpdate {
            first_name: "Minh".to_string(),
            last_name: "Tran".to_string(),
            phone: "1".to_string(),
            address: "12 Le Loi".to_string(),
            ward: "Thuan Phuoc".to_string(),
            city: "Da Nang".to_string(),
            latitude: 16.07,
            longitude: 108.22,
        };

        let err = client.update_profile(&update).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field_errors().unwrap()["phone"], vec!["too short"]);
    }

    #[tokio::test]
    async fn test_update_profile_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/identity/user/rescuer/profile")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "firstName": "Minh",
                "ward": "Thuan Phuoc"
            })))
            .with_status(200)
            .with_body(profile_body())
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let update = ProfileUpdate {
            first_name: "Minh".to_string(),
            last_name: "Tran".to_string(),
            phone: "0901234567".to_string(),
            address: "12 Le Loi".to_string(),
            ward: "Thuan Phuoc".to_string(),
            city: "Da Nang".to_string(),
            latitude: 16.07,
            longitude: 108.22,
        };

        let profile = client.update_profile(&update).await.unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Minh"));
    }

    #[tokio::test]
    async fn test_submit_consent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/identity/user/rescuer/consent")
            .match_body(Matcher::Json(serde_json::json!({
                "agreeTerms": true,
                "agreeDataSharing": true,
                "agreeLocationTracking": false,
                "agreeNotifications": true
            })))
            .with_status(200)
            .with_body(profile_body())
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let consent = Consent {
            agree_terms: true,
            agree_data_sharing: true,
            agree_location_tracking: false,
            agree_notifications: true,
        };

        client.submit_consent(&consent).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unstructured_error_falls_back_to_generic() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/identity/abilities")
            .with_status(500)
            .with_body("<html>internal error</html>")
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let err = client.abilities().await.unwrap_err();

        assert!(matches!(err, RemoteError::Status(..)));
        assert!(err.to_string().contains("could not be completed"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = IdentityClient::new("https://api.example.com/");
        assert_eq!(client.base_url, "https://api.example.com");
    }
}
