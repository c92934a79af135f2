//! Local key-value storage contracts.

pub mod prefs;
