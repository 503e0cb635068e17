//! # paramsuite
//!
//! A Rust crate for driving parameterized GUI test suites against a target
//! application.
//!
//! A suite is expanded by an [`Expansion`] into ordered children (test class
//! x parameter set). The [`SuiteRunner`] wraps that expansion. At
//! construction it installs a class-name filter when the process-wide
//! filtering switch is on. While running, it isolates faults so that one
//! broken child cannot abort the rest of the suite, and it performs a
//! one-time "first start" of the target environment before children
//! execute.

pub mod error;
pub mod filter;
pub mod metadata;
pub mod notify;
pub mod suite;

pub use error::{Error, Result};
pub use filter::{ClassNameFilter, FilterSettings, FILTER_ENABLED_KEY, FILTER_TESTS_KEY};
pub use metadata::{MetadataStore, SuiteMetadata, TargetConfig};
pub use notify::{ChildDescription, ConsoleNotifier, RunNotifier, TestFailure};
pub use suite::{
    Expansion, LauncherFn, ParameterizedExpansion, SuiteRunner, TestChild, TestFn,
    UNDEFINED_FIRST_CLASS,
};

/// Builder for configuring and constructing a suite runner
///
/// This provides a fluent interface for wiring a suite class to its
/// metadata, filter settings, and environment launcher.
///
/// # Examples
///
/// ```no_run
/// use paramsuite::harness;
/// use paramsuite::{
///     ConsoleNotifier, MetadataStore, ParameterizedExpansion, SuiteMetadata, TargetConfig,
/// };
///
/// let mut store = MetadataStore::new();
/// store.register(
///     "EditorSuite",
///     SuiteMetadata {
///         target_config: Some(TargetConfig::new("community")),
///         first_start_class: Some("EditorFirstStart".to_string()),
///     },
/// );
///
/// let expansion = ParameterizedExpansion::new()
///     .test_class("EditorTest", |_param| Ok(()))
///     .parameters(["2023.1", "2023.2"]);
///
/// let mut suite = harness::suite("EditorSuite")
///     .metadata(store)
///     .launcher(|target, class| {
///         // Start the application once so `class` can prepare it
///         println!("first start of {} on {}", class, target);
///         Ok(())
///     })
///     .build(expansion);
///
/// suite.run(&mut ConsoleNotifier::new()).unwrap();
/// ```
pub struct Builder {
    suite_class: String,
    store: MetadataStore,
    settings: Option<FilterSettings>,
    launcher: Option<LauncherFn>,
}

impl Builder {
    /// Create a new builder for the given suite class
    fn new(suite_class: impl Into<String>) -> Self {
        Self {
            suite_class: suite_class.into(),
            store: MetadataStore::new(),
            settings: None,
            launcher: None,
        }
    }

    /// Supply the metadata store the suite's declarations are resolved from
    pub fn metadata(mut self, store: MetadataStore) -> Self {
        self.store = store;
        self
    }

    /// Override the filter settings instead of reading the environment
    pub fn filter_settings(mut self, settings: FilterSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Supply the launcher that performs the one-time environment setup
    ///
    /// The launcher receives the suite's target configuration and the
    /// declared first-start class name.
    pub fn launcher<F>(mut self, func: F) -> Self
    where
        F: Fn(&TargetConfig, &str) -> Result<()> + 'static,
    {
        self.launcher = Some(Box::new(func));
        self
    }

    /// Construct the suite runner over the given expansion
    ///
    /// Filter settings default to the process-wide environment switch. An
    /// enabled filter that eliminates every child is logged and recovered;
    /// the suite then runs with zero children.
    pub fn build<E: Expansion>(self, expansion: E) -> SuiteRunner<E> {
        let settings = self.settings.unwrap_or_else(FilterSettings::from_env);
        SuiteRunner::new(self.suite_class, self.store, settings, self.launcher, expansion)
    }
}

/// Create a new suite builder for the given suite class
///
/// This is the main entry point for driving a parameterized suite.
///
/// # Examples
///
/// ```no_run
/// use paramsuite::harness;
/// use paramsuite::{ConsoleNotifier, ParameterizedExpansion};
///
/// let expansion = ParameterizedExpansion::new()
///     .test_class("SmokeTest", |_param| Ok(()))
///     .parameter("2023.1");
///
/// let mut suite = harness::suite("SmokeSuite").build(expansion);
/// suite.run(&mut ConsoleNotifier::new()).unwrap();
/// ```
pub mod harness {
    use super::*;

    /// Create a new suite builder for the given suite class
    pub fn suite(suite_class: impl Into<String>) -> Builder {
        Builder::new(suite_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(_param: &str) -> Result<()> {
        Ok(())
    }

    #[test]
    fn built_suite_exposes_resolved_metadata() {
        let mut store = MetadataStore::new();
        store.register(
            "EditorSuite",
            SuiteMetadata {
                target_config: Some(TargetConfig::new("community")),
                first_start_class: None,
            },
        );

        let expansion = ParameterizedExpansion::new()
            .test_class("EditorTest", pass)
            .parameter("2023.1");
        let suite = harness::suite("EditorSuite")
            .metadata(store)
            .filter_settings(FilterSettings::default())
            .build(expansion);

        assert_eq!(suite.suite_class(), "EditorSuite");
        assert_eq!(suite.target_configuration(), &TargetConfig::new("community"));
        assert_eq!(suite.first_start_class_name(), UNDEFINED_FIRST_CLASS);
        assert!(suite.first_start_pending());
        assert!(suite.filter().is_none());
        assert_eq!(suite.children().len(), 1);
    }

    #[test]
    fn unregistered_suite_builds_with_defaults() {
        let expansion = ParameterizedExpansion::new()
            .test_class("SmokeTest", pass)
            .parameter("2023.1");
        let suite = harness::suite("SmokeSuite")
            .filter_settings(FilterSettings::default())
            .build(expansion);

        assert_eq!(suite.target_configuration(), &TargetConfig::default());
        assert_eq!(suite.first_start_class_name(), UNDEFINED_FIRST_CLASS);
    }
}
