//! Configuration Module
//!
//! Command line flags with environment fallbacks, and the wiring from
//! settings to a ready `SearchAggregator`. Invalid settings are reported
//! as `ConfigError` at startup.

pub mod settings;

pub use settings::{DiscoveryStrategy, Settings};
