//! `rescuekit` - Client-side toolkit for a disaster-rescue coordination service
//!
//! This library provides the local session store and onboarding state machine
//! a rescuer walks through after registration, plus the accent-insensitive
//! search index over the service's navigation catalog.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod onboarding;
pub mod search;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use onboarding::{OnboardingArtifacts, OnboardingStatus, OnboardingStep};
pub use search::{GroupedResults, SearchIndex, SearchItem};
pub use session::{KeyValueStore, MemoryStore, SessionStore, SqliteStore};
