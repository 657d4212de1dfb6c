//! User profile types.

mod model;

pub use model::{DEFAULT_HABITS_SUMMARY, Preferences, Profile, TonePreference};
