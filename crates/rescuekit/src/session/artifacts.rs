//! Onboarding artifact types.
//!
//! These are the records a rescuer produces while walking through the
//! onboarding flow. Each is persisted independently under its own session
//! key and written wholesale on every submission.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the user authenticated at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Signed in with a Google account.
    Google,
    /// Registered with email and password.
    Email,
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// The authenticated user's identity snapshot.
///
/// Created on first successful registration. Exactly one identity exists in
/// the session at a time; registering again overwrites it. Cleared on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// The user's email address.
    pub email: String,

    /// Display name, if the auth provider supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Avatar URL, if the auth provider supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// How the user authenticated.
    pub auth_method: AuthMethod,

    /// When the registration happened.
    pub registered_at: DateTime<Utc>,
}

impl UserIdentity {
    /// Create a new identity registered now.
    #[must_use]
    pub fn new(email: impl Into<String>, auth_method: AuthMethod) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            avatar_url: None,
            auth_method,
            registered_at: Utc::now(),
        }
    }
}

/// Personal information submitted in the first onboarding step.
///
/// Overwritten wholesale on every submission; there are no partial-field
/// updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
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
    /// District.
    pub district: String,
    /// City or province.
    pub city: String,
}

/// Ordered free-form answers to the fixed ability question set.
///
/// A non-empty sequence marks the coarse ability-check step complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityAnswers(pub Vec<String>);

impl AbilityAnswers {
    /// Whether no answers have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded answers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Skill identifiers chosen in the detailed-abilities step.
///
/// A non-empty set marks that step complete. Stored as an ordered set so
/// serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSkills(pub BTreeSet<String>);

impl SelectedSkills {
    /// Whether no skills have been selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether a specific skill is selected.
    #[must_use]
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }
}

impl FromIterator<String> for SelectedSkills {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Bearer tokens for authenticated identity API requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived access token sent as the bearer credential.
    pub access_token: String,
    /// Long-lived token used to refresh the access token.
    pub refresh_token: String,
}
