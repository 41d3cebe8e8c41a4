//! `rescuekit-remote` - Remote clients for the rescue coordination backend
//!
//! Thin, typed wrappers over the identity/profile API and the third-party
//! media upload host. Everything here is a pass-through to an external
//! system: requests are built, sent, and their responses normalized; no
//! business logic lives in this crate.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod error;
pub mod identity;
pub mod media;

pub use error::{RemoteError, RemoteResult};
pub use identity::{
    Ability, AbilityRating, Consent, IdentityClient, Profile, ProfileUpdate, RatedAbility,
    RescuerAbilities, SubmitReply,
};
pub use media::{MediaUploader, ResourceType, UploadedMedia};
