//! Boot-time loading.
//!
//! Provides the reset stub that seeds the boot ROM before any hart runs.

pub mod loader;
