//! Suite metadata: target configurations and first-start declarations
//!
//! The embedding harness registers, per suite class, which target
//! configuration its children exercise and which class (if any) performs the
//! one-time environment setup. Lookups are total: a suite with no
//! registration runs against the default target configuration.

use std::collections::HashMap;
use std::fmt;

/// Opaque identifier of the environment/application variant a suite runs
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetConfig(String);

impl TargetConfig {
    /// Create a target configuration from its identifier
    pub fn new(id: impl Into<String>) -> Self {
        TargetConfig(id.into())
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig("default".to_string())
    }
}

impl fmt::Display for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declarative metadata attached to one suite class
#[derive(Debug, Clone, Default)]
pub struct SuiteMetadata {
    /// Target configuration the suite exercises, if declared
    pub target_config: Option<TargetConfig>,
    /// Class that performs the one-time environment setup, if declared
    pub first_start_class: Option<String>,
}

/// Lookup table associating suite classes with their declared metadata
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    entries: HashMap<String, SuiteMetadata>,
}

impl MetadataStore {
    /// Create an empty store
    pub fn new() -> Self {
        MetadataStore::default()
    }

    /// Register metadata for a suite class, replacing any previous entry
    pub fn register(&mut self, suite_class: impl Into<String>, metadata: SuiteMetadata) {
        self.entries.insert(suite_class.into(), metadata);
    }

    /// Target configuration for a suite class; the default when the suite
    /// declares none. Never fails.
    pub fn target_configuration(&self, suite_class: &str) -> TargetConfig {
        self.entries
            .get(suite_class)
            .and_then(|m| m.target_config.clone())
            .unwrap_or_default()
    }

    /// First-start class declared by a suite class, if any
    pub fn first_start_class_name(&self, suite_class: &str) -> Option<String> {
        self.entries
            .get(suite_class)
            .and_then(|m| m.first_start_class.clone())
    }
}
