//! Persisted session layer.
//!
//! This module provides the [`SessionStore`]: a typed wrapper over a
//! [`KeyValueStore`] holding the authenticated user's identity snapshot and
//! the intermediate onboarding artifacts. Each artifact lives under its own
//! logical key and is serialized as JSON.
//!
//! Reads are lenient: a stored value that fails to decode is treated as
//! absent and logged, never surfaced to the caller. This keeps a corrupted
//! single key from wedging the whole flow.

pub mod artifacts;
pub mod store;

use tracing::warn;

pub use artifacts::{
    AbilityAnswers, AuthMethod, AuthTokens, PersonalInfo, SelectedSkills, UserIdentity,
};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};

use crate::error::Result;
use crate::onboarding::OnboardingArtifacts;

/// Logical key for the user identity record.
const KEY_IDENTITY: &str = "user_identity";
/// Logical key for the personal-info record.
const KEY_PERSONAL_INFO: &str = "personal_info";
/// Logical key for the ability-answers sequence.
const KEY_ABILITY_ANSWERS: &str = "ability_answers";
/// Logical key for the selected-skills set.
const KEY_SELECTED_SKILLS: &str = "selected_skills";
/// Logical key for the explicit onboarding-complete flag.
const KEY_ONBOARDING_COMPLETE: &str = "onboarding_complete";
/// Logical key for the auth token pair.
const KEY_AUTH_TOKENS: &str = "auth_tokens";

/// All logical keys owned by the session, in clear order.
const ALL_KEYS: [&str; 6] = [
    KEY_IDENTITY,
    KEY_PERSONAL_INFO,
    KEY_ABILITY_ANSWERS,
    KEY_SELECTED_SKILLS,
    KEY_ONBOARDING_COMPLETE,
    KEY_AUTH_TOKENS,
];

/// Typed session store over an injected key-value backend.
///
/// Reads always observe the most recent write from the same process; there is
/// no cross-process consistency guarantee (last-write-wins per key).
#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a session store over the given backend.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read and decode the value under `key`, treating malformed data as
    /// absent.
    fn read<T: serde::de::DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("discarding malformed session value under '{key}': {err}");
                Ok(None)
            }
        }
    }

    /// Serialize and store `value` under `key`.
    fn write<T: serde::Serialize>(&self, key: &'static str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.put(key, &raw)
    }

    /// Read the stored identity, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails. A malformed stored value reads
    /// as `None`.
    pub fn identity(&self) -> Result<Option<UserIdentity>> {
        self.read(KEY_IDENTITY)
    }

    /// Store the identity, overwriting any previous registration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend fails.
    pub fn set_identity(&self, identity: &UserIdentity) -> Result<()> {
        self.write(KEY_IDENTITY, identity)
    }

    /// Read the stored personal info, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn personal_info(&self) -> Result<Option<PersonalInfo>> {
        self.read(KEY_PERSONAL_INFO)
    }

    /// Store personal info wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend fails.
    pub fn set_personal_info(&self, info: &PersonalInfo) -> Result<()> {
        self.write(KEY_PERSONAL_INFO, info)
    }

    /// Read the stored ability answers, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn ability_answers(&self) -> Result<Option<AbilityAnswers>> {
        self.read(KEY_ABILITY_ANSWERS)
    }

    /// Store the ability answers.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend fails.
    pub fn set_ability_answers(&self, answers: &AbilityAnswers) -> Result<()> {
        self.write(KEY_ABILITY_ANSWERS, answers)
    }

    /// Read the stored skill selection, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn selected_skills(&self) -> Result<Option<SelectedSkills>> {
        self.read(KEY_SELECTED_SKILLS)
    }

    /// Store the skill selection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend fails.
    pub fn set_selected_skills(&self, skills: &SelectedSkills) -> Result<()> {
        self.write(KEY_SELECTED_SKILLS, skills)
    }

    /// Read the explicit onboarding-complete flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn onboarding_complete(&self) -> Result<bool> {
        Ok(self.read(KEY_ONBOARDING_COMPLETE)?.unwrap_or(false))
    }

    /// Set the explicit onboarding-complete flag.
    ///
    /// This is the only "done" marker that is stored directly; every other
    /// status field is inferred from artifact presence.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn complete_onboarding(&self) -> Result<()> {
        self.write(KEY_ONBOARDING_COMPLETE, &true)
    }

    /// Read the stored auth tokens, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn tokens(&self) -> Result<Option<AuthTokens>> {
        self.read(KEY_AUTH_TOKENS)
    }

    /// Store the auth tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend fails.
    pub fn set_tokens(&self, tokens: &AuthTokens) -> Result<()> {
        self.write(KEY_AUTH_TOKENS, tokens)
    }

    /// Load all onboarding artifacts in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn artifacts(&self) -> Result<OnboardingArtifacts> {
        Ok(OnboardingArtifacts {
            identity: self.identity()?,
            personal_info: self.personal_info()?,
            ability_answers: self.ability_answers()?,
            selected_skills: self.selected_skills()?,
            completed: self.onboarding_complete()?,
        })
    }

    /// Clear the identity, every onboarding artifact, and the auth tokens.
    ///
    /// Every key removal is attempted even if an earlier one fails, so a
    /// single bad key never leaves the rest of the session populated. The
    /// first failure is reported after the sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if any key removal fails.
    pub fn logout(&self) -> Result<()> {
        let mut first_error = None;
        for key in ALL_KEYS {
            if let Err(err) = self.backend.remove(key) {
                warn!("failed to clear session key '{key}': {err}");
                first_error.get_or_insert(crate::error::Error::session_clear(key, err.to_string()));
            }
        }
        match first_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}
