//! Onboarding status evaluation and step navigation.
//!
//! A new rescuer completes a fixed four-step sequence after registration:
//! personal info → ability check → detailed skills → profile. Completion of
//! the first three steps is inferred from the presence of their stored
//! artifacts; only the final "done" marker is an explicit flag.

use serde::{Deserialize, Serialize};

use crate::session::{AbilityAnswers, PersonalInfo, SelectedSkills, UserIdentity};

/// Snapshot of the stored onboarding artifacts.
///
/// Loaded from a [`crate::session::SessionStore`] in production, or built
/// directly in tests.
#[derive(Debug, Clone, Default)]
pub struct OnboardingArtifacts {
    /// The identity snapshot, if registered.
    pub identity: Option<UserIdentity>,
    /// Personal info, if the step was submitted.
    pub personal_info: Option<PersonalInfo>,
    /// Ability answers, if the step was submitted.
    pub ability_answers: Option<AbilityAnswers>,
    /// Selected skills, if the step was submitted.
    pub selected_skills: Option<SelectedSkills>,
    /// The explicit completion flag.
    pub completed: bool,
}

/// Derived completion state of the onboarding flow.
///
/// Never persisted; recomputed on demand from the stored artifacts. Each
/// field reports artifact presence independently; ordering is enforced by
/// [`OnboardingStep::next`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStatus {
    /// An identity snapshot exists.
    pub is_registered: bool,
    /// Personal info exists and its first name is non-empty.
    pub has_personal_info: bool,
    /// A non-empty ability-answer sequence exists.
    pub has_ability_check: bool,
    /// A non-empty skill selection exists.
    pub has_detailed_abilities: bool,
    /// The explicit completion flag was set.
    pub is_complete: bool,
}

impl OnboardingStatus {
    /// Evaluate the status from the stored artifacts.
    ///
    /// Pure projection, no caching: callers re-evaluate after any mutation.
    /// `has_personal_info` checks only that the first name is non-empty, a
    /// deliberately partial validity check; full validation is the backend's
    /// job.
    #[must_use]
    pub fn evaluate(artifacts: &OnboardingArtifacts) -> Self {
        Self {
            is_registered: artifacts.identity.is_some(),
            has_personal_info: artifacts
                .personal_info
                .as_ref()
                .is_some_and(|info| !info.first_name.is_empty()),
            has_ability_check: artifacts
                .ability_answers
                .as_ref()
                .is_some_and(|answers| !answers.is_empty()),
            has_detailed_abilities: artifacts
                .selected_skills
                .as_ref()
                .is_some_and(|skills| !skills.is_empty()),
            is_complete: artifacts.completed,
        }
    }
}

/// A destination in the onboarding sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    /// The personal-info form.
    PersonalInfo,
    /// The coarse ability self-assessment.
    AbilityCheck,
    /// The detailed skill selection.
    DetailedAbilities,
    /// The rescuer profile page.
    Profile,
}

impl OnboardingStep {
    /// Resolve the next required step for the given status.
    ///
    /// Deterministic ordered check over the single supported sequence:
    /// personal info, then ability check, then detailed abilities, then the
    /// profile. Total: always resolves to a destination.
    #[must_use]
    pub fn next(status: &OnboardingStatus) -> Self {
        if !status.has_personal_info {
            Self::PersonalInfo
        } else if !status.has_ability_check {
            Self::AbilityCheck
        } else if !status.has_detailed_abilities {
            Self::DetailedAbilities
        } else {
            Self::Profile
        }
    }

    /// The UI route for this step.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "/onboarding/personal-info",
            Self::AbilityCheck => "/onboarding/ability-check",
            Self::DetailedAbilities => "/onboarding/abilities",
            Self::Profile => "/profile",
        }
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonalInfo => write!(f, "personal_info"),
            Self::AbilityCheck => write!(f, "ability_check"),
            Self::DetailedAbilities => write!(f, "detailed_abilities"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AuthMethod;

    fn info_named(first_name: &str) -> PersonalInfo {
        PersonalInfo {
            first_name: first_name.to_string(),
            ..PersonalInfo::default()
        }
    }

    fn full_artifacts() -> OnboardingArtifacts {
        OnboardingArtifacts {
            identity: Some(UserIdentity::new("a@b.c", AuthMethod::Email)),
            personal_info: Some(info_named("Minh")),
            ability_answers: Some(AbilityAnswers(vec!["yes".to_string()])),
            selected_skills: Some(["swimming".to_string()].into_iter().collect()),
            completed: false,
        }
    }

    #[test]
    fn test_evaluate_empty_artifacts() {
        let status = OnboardingStatus::evaluate(&OnboardingArtifacts::default());

        assert!(!status.is_registered);
        assert!(!status.has_personal_info);
        assert!(!status.has_ability_check);
        assert!(!status.has_detailed_abilities);
        assert!(!status.is_complete);
    }

    #[test]
    fn test_personal_info_requires_first_name() {
        let mut artifacts = OnboardingArtifacts {
            personal_info: Some(info_named("Minh")),
            ..OnboardingArtifacts::default()
        };
        assert!(OnboardingStatus::evaluate(&artifacts).has_personal_info);

        // Present but with an empty first name does not count
        artifacts.personal_info = Some(info_named(""));
        assert!(!OnboardingStatus::evaluate(&artifacts).has_personal_info);
    }

    #[test]
    fn test_empty_answers_do_not_count() {
        let artifacts = OnboardingArtifacts {
            ability_answers: Some(AbilityAnswers::default()),
            ..OnboardingArtifacts::default()
        };
        assert!(!OnboardingStatus::evaluate(&artifacts).has_ability_check);
    }

    #[test]
    fn test_empty_skills_do_not_count() {
        let artifacts = OnboardingArtifacts {
            selected_skills: Some(SelectedSkills::default()),
            ..OnboardingArtifacts::default()
        };
        assert!(!OnboardingStatus::evaluate(&artifacts).has_detailed_abilities);
    }

    #[test]
    fn test_fields_evaluated_independently() {
        // Skills present without the earlier steps still reports true;
        // ordering lives in the navigator.
        let artifacts = OnboardingArtifacts {
            selected_skills: Some(["swimming".to_string()].into_iter().collect()),
            ..OnboardingArtifacts::default()
        };
        let status = OnboardingStatus::evaluate(&artifacts);

        assert!(status.has_detailed_abilities);
        assert!(!status.has_personal_info);
    }

    #[test]
    fn test_completion_flag_is_explicit() {
        let mut artifacts = full_artifacts();
        assert!(!OnboardingStatus::evaluate(&artifacts).is_complete);

        artifacts.completed = true;
        assert!(OnboardingStatus::evaluate(&artifacts).is_complete);
    }

    #[test]
    fn test_next_with_nothing_stored() {
        let status = OnboardingStatus::evaluate(&OnboardingArtifacts::default());
        assert_eq!(OnboardingStep::next(&status), OnboardingStep::PersonalInfo);
    }

    #[test]
    fn test_next_walks_the_sequence() {
        let mut artifacts = OnboardingArtifacts {
            personal_info: Some(info_named("Minh")),
            ..OnboardingArtifacts::default()
        };
        let status = OnboardingStatus::evaluate(&artifacts);
        assert_eq!(OnboardingStep::next(&status), OnboardingStep::AbilityCheck);

        artifacts.ability_answers = Some(AbilityAnswers(vec!["yes".to_string()]));
        let status = OnboardingStatus::evaluate(&artifacts);
        assert_eq!(
            OnboardingStep::next(&status),
            OnboardingStep::DetailedAbilities
        );
    }

    #[test]
    fn test_next_with_all_artifacts_is_profile() {
        // Completion flag is irrelevant to this check
        let status = OnboardingStatus::evaluate(&full_artifacts());
        assert_eq!(OnboardingStep::next(&status), OnboardingStep::Profile);
    }

    #[test]
    fn test_next_ignores_later_steps_until_earlier_done() {
        let artifacts = OnboardingArtifacts {
            selected_skills: Some(["swimming".to_string()].into_iter().collect()),
            ..OnboardingArtifacts::default()
        };
        let status = OnboardingStatus::evaluate(&artifacts);
        assert_eq!(OnboardingStep::next(&status), OnboardingStep::PersonalInfo);
    }

    #[test]
    fn test_step_paths() {
        assert_eq!(
            OnboardingStep::PersonalInfo.path(),
            "/onboarding/personal-info"
        );
        assert_eq!(
            OnboardingStep::AbilityCheck.path(),
            "/onboarding/ability-check"
        );
        assert_eq!(
            OnboardingStep::DetailedAbilities.path(),
            "/onboarding/abilities"
        );
        assert_eq!(OnboardingStep::Profile.path(), "/profile");
    }

    #[test]
    fn test_step_display() {
        assert_eq!(OnboardingStep::PersonalInfo.to_string(), "personal_info");
        assert_eq!(OnboardingStep::Profile.to_string(), "profile");
    }

    #[test]
    fn test_status_serialization() {
        let status = OnboardingStatus::evaluate(&full_artifacts());
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"is_registered\":true"));
        assert!(json.contains("\"is_complete\":false"));
    }
}
