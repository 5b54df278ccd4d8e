//! Wellness onboarding — profile-setup wizard and its backend client.

pub mod backend;
pub mod config;
pub mod error;
pub mod onboarding;
