//! The suite execution controller

use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::error::Result;
use crate::filter::{ClassNameFilter, FilterSettings};
use crate::metadata::{MetadataStore, TargetConfig};
use crate::notify::{RunNotifier, TestFailure};
use crate::suite::expansion::{Expansion, TestChild};

/// Sentinel memoized when a suite declares no first-start class
pub const UNDEFINED_FIRST_CLASS: &str = "undefined";

/// Type alias for the environment launcher performing first-time setup
pub type LauncherFn = Box<dyn Fn(&TargetConfig, &str) -> Result<()>>;

/// Controller for one parameterized suite run.
///
/// Wraps an [`Expansion`]. At construction it applies the class-name filter
/// when the process-wide switch is on. While running it isolates faults in
/// each child's execution and performs the one-time "first start" of the
/// target environment before children execute.
pub struct SuiteRunner<E: Expansion> {
    suite_class: String,
    target: TargetConfig,
    store: MetadataStore,
    first_start_class: OnceCell<String>,
    first_start_pending: bool,
    filter: Option<ClassNameFilter>,
    launcher: Option<LauncherFn>,
    expansion: E,
}

impl<E: Expansion> SuiteRunner<E> {
    pub(crate) fn new(
        suite_class: String,
        store: MetadataStore,
        settings: FilterSettings,
        launcher: Option<LauncherFn>,
        mut expansion: E,
    ) -> Self {
        let target = store.target_configuration(&suite_class);

        let filter = if settings.enabled {
            let filter = ClassNameFilter::new(&settings);
            let admitted: Vec<&str> =
                filter.class_set().iter().map(String::as_str).collect();
            info!(
                suite = %suite_class,
                "tests filter is applied, next tests will be run: {}",
                admitted.join(", ")
            );
            if let Err(e) = expansion.install_filter(&filter) {
                // An exhausted filter is not fatal: the suite runs empty.
                error!(suite = %suite_class, error = %e, "class filter left no children");
            }
            Some(filter)
        } else {
            None
        };

        SuiteRunner {
            suite_class,
            target,
            store,
            first_start_class: OnceCell::new(),
            first_start_pending: true,
            filter,
            launcher,
            expansion,
        }
    }

    /// The suite class this runner was built for
    pub fn suite_class(&self) -> &str {
        &self.suite_class
    }

    /// The target configuration the suite's children exercise
    pub fn target_configuration(&self) -> &TargetConfig {
        &self.target
    }

    /// The declared first-start class name, resolved on first access and
    /// memoized; [`UNDEFINED_FIRST_CLASS`] when the suite declares none.
    pub fn first_start_class_name(&self) -> &str {
        self.first_start_class.get_or_init(|| {
            self.store
                .first_start_class_name(&self.suite_class)
                .unwrap_or_else(|| UNDEFINED_FIRST_CLASS.to_string())
        })
    }

    /// Whether the one-time environment setup has not happened yet
    pub fn first_start_pending(&self) -> bool {
        self.first_start_pending
    }

    /// The installed class filter, if the filtering switch was enabled
    pub fn filter(&self) -> Option<&ClassNameFilter> {
        self.filter.as_ref()
    }

    /// Ordered snapshot of the children eligible to run
    pub fn children(&self) -> Vec<TestChild> {
        self.expansion.children()
    }

    /// Perform the one-time environment setup for this suite.
    ///
    /// A no-op when the suite declares no first-start class. Otherwise
    /// delegates to the launcher with the target configuration and the
    /// declared class; launcher errors propagate to the caller, since a
    /// failed setup invalidates the whole run. On success the pending flag
    /// clears. The method itself does not guard against re-invocation; not
    /// calling it twice is the caller's obligation.
    pub fn first_start(&mut self) -> Result<()> {
        let class_name = self.first_start_class_name().to_string();
        if class_name == UNDEFINED_FIRST_CLASS {
            return Ok(());
        }

        info!(
            suite = %self.suite_class,
            target = %self.target,
            "target is configuring for the first time"
        );
        let launcher = self.launcher.as_ref().ok_or_else(|| {
            crate::error::Error::first_start(
                self.target.as_str(),
                &class_name,
                "no environment launcher configured",
            )
        })?;
        launcher(&self.target, &class_name)?;
        self.first_start_pending = false;
        Ok(())
    }

    /// Execute one child, isolating faults in the execution machinery.
    ///
    /// Delegates to the expansion's standard path, which notifies started,
    /// finished, and ordinary test failures itself. Anything that escapes
    /// that path is logged and converted into a single synthesized failure
    /// for this child's description; it never aborts the remaining
    /// children.
    pub fn run_child(&mut self, child: &TestChild, notifier: &mut dyn RunNotifier) {
        if let Err(e) = self.expansion.execute_child(child, notifier) {
            error!(
                child = %child.description(),
                error = %e,
                "child execution aborted outside the reporting channel"
            );
            notifier.fire_test_failure(TestFailure::new(child.description().clone(), e));
        }
    }

    /// Run the whole suite: first start (while still pending), then every
    /// eligible child in expansion order.
    ///
    /// Per-child faults are isolated by [`run_child`](SuiteRunner::run_child)
    /// and never fail the run; only a first-start error escapes.
    pub fn run(&mut self, notifier: &mut dyn RunNotifier) -> Result<()> {
        if self.first_start_pending {
            self.first_start()?;
        }
        for child in self.expansion.children() {
            self.run_child(&child, notifier);
        }
        Ok(())
    }
}
