//! Class-name filtering of suite children
//!
//! A process-wide switch decides whether a suite restricts itself to an
//! explicit list of test classes. The list is a comma-separated string of
//! simple class names; it is read once per suite and parsed lazily into a
//! set that never changes for the rest of the run.

use std::collections::HashSet;

use once_cell::sync::OnceCell;

use crate::notify::ChildDescription;

/// Environment variable enabling the class filter ("1" or "true")
pub const FILTER_ENABLED_KEY: &str = "GUI_TEST_FILTER";

/// Environment variable holding the comma-separated list of simple class
/// names to run
pub const FILTER_TESTS_KEY: &str = "GUI_TEST_FILTER_TESTS";

/// Process-wide filtering configuration, read at most once per suite
#[derive(Debug, Clone, Default)]
pub struct FilterSettings {
    /// Whether the filter should be installed at all
    pub enabled: bool,
    /// Raw comma-separated list of simple class names
    pub class_list: String,
}

impl FilterSettings {
    /// Read the filtering switch and class list from the environment
    pub fn from_env() -> Self {
        let enabled = std::env::var(FILTER_ENABLED_KEY)
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let class_list = std::env::var(FILTER_TESTS_KEY).unwrap_or_default();

        FilterSettings { enabled, class_list }
    }

    /// Settings with the filter enabled for the given class list
    pub fn with_class_list(class_list: impl Into<String>) -> Self {
        FilterSettings {
            enabled: true,
            class_list: class_list.into(),
        }
    }
}

/// Selection filter over child test identities.
///
/// Membership is decided by the child's simple class name. The backing set
/// is parsed on first use and memoized; mutating the configuration source
/// afterwards has no effect on a live filter.
///
/// Note that an empty class list still parses to a set with one
/// empty-string entry, which matches no real class name, so an enabled
/// filter with a blank list runs nothing.
#[derive(Debug, Default)]
pub struct ClassNameFilter {
    class_list: String,
    class_set: OnceCell<HashSet<String>>,
}

impl ClassNameFilter {
    /// Build a filter over the configured class list
    pub fn new(settings: &FilterSettings) -> Self {
        ClassNameFilter {
            class_list: settings.class_list.clone(),
            class_set: OnceCell::new(),
        }
    }

    /// The memoized set of simple class names this filter admits
    pub fn class_set(&self) -> &HashSet<String> {
        self.class_set.get_or_init(|| {
            self.class_list.split(',').map(str::to_string).collect()
        })
    }

    /// Whether the described child should run
    pub fn should_run(&self, description: &ChildDescription) -> bool {
        self.class_set().contains(description.class_name())
    }

    /// Human-readable description of what this filter does
    pub fn describe(&self) -> String {
        format!(
            "filters test classes by their short names listed in `{}`",
            FILTER_TESTS_KEY
        )
    }
}
