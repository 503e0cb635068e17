//! Expansion of a suite class into runnable parameterized children

use crate::error::{Error, Result};
use crate::filter::ClassNameFilter;
use crate::notify::{ChildDescription, RunNotifier, TestFailure};

/// Type alias for a test-class function, invoked once per parameter set
pub type TestFn = fn(&str) -> Result<()>;

/// One expanded, runnable child: a test class paired with one parameter set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestChild {
    description: ChildDescription,
    parameter: String,
}

impl TestChild {
    /// Create a child for a test class and one parameter
    pub fn new(class_name: &str, parameter: impl Into<String>) -> Self {
        let parameter = parameter.into();
        TestChild {
            description: ChildDescription::new(
                class_name,
                format!("{}[{}]", class_name, parameter),
            ),
            parameter,
        }
    }

    /// The child's identity
    pub fn description(&self) -> &ChildDescription {
        &self.description
    }

    /// The parameter this child runs with
    pub fn parameter(&self) -> &str {
        &self.parameter
    }
}

/// The underlying mechanism that expands a suite class into an ordered
/// sequence of runnable children.
///
/// The suite runner wraps an implementation of this trait: it installs the
/// selection filter during construction and delegates each child's
/// execution to [`execute_child`](Expansion::execute_child).
pub trait Expansion {
    /// Restrict the expanded children to those admitted by `filter`.
    ///
    /// Returns [`Error::NoTestsRemain`] when the filter eliminates every
    /// child; the expansion is then empty.
    fn install_filter(&mut self, filter: &ClassNameFilter) -> Result<()>;

    /// Ordered snapshot of the runnable children, after any filtering
    fn children(&self) -> Vec<TestChild>;

    /// Execute one child through the standard path, notifying started,
    /// finished, and any ordinary test failure.
    ///
    /// An `Err` return means the execution machinery itself broke outside
    /// the reporting channel, not that the test failed.
    fn execute_child(
        &mut self,
        child: &TestChild,
        notifier: &mut dyn RunNotifier,
    ) -> Result<()>;
}

/// Expansion of declared test classes across declared parameter sets.
///
/// Children are expanded in declaration order, class-major: every parameter
/// of the first class, then every parameter of the second, and so on. A
/// suite with no parameters expands to no children.
#[derive(Default)]
pub struct ParameterizedExpansion {
    classes: Vec<(String, TestFn)>,
    parameters: Vec<String>,
    children: Vec<TestChild>,
}

impl ParameterizedExpansion {
    /// Create an empty expansion
    pub fn new() -> Self {
        ParameterizedExpansion::default()
    }

    /// Declare a test class by its simple name
    pub fn test_class(mut self, class_name: &str, func: TestFn) -> Self {
        self.classes.push((class_name.to_string(), func));
        self.expand();
        self
    }

    /// Declare one parameter set
    pub fn parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self.expand();
        self
    }

    /// Declare several parameter sets at once
    pub fn parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters.extend(parameters.into_iter().map(Into::into));
        self.expand();
        self
    }

    fn expand(&mut self) {
        self.children = self
            .classes
            .iter()
            .flat_map(|(class_name, _)| {
                self.parameters
                    .iter()
                    .map(move |p| TestChild::new(class_name, p.clone()))
            })
            .collect();
    }

    fn test_fn(&self, class_name: &str) -> Option<TestFn> {
        self.classes
            .iter()
            .find(|(name, _)| name.as_str() == class_name)
            .map(|(_, func)| *func)
    }
}

impl Expansion for ParameterizedExpansion {
    fn install_filter(&mut self, filter: &ClassNameFilter) -> Result<()> {
        self.children.retain(|child| filter.should_run(child.description()));
        if self.children.is_empty() {
            return Err(Error::NoTestsRemain);
        }
        Ok(())
    }

    fn children(&self) -> Vec<TestChild> {
        self.children.clone()
    }

    fn execute_child(
        &mut self,
        child: &TestChild,
        notifier: &mut dyn RunNotifier,
    ) -> Result<()> {
        let description = child.description();
        let func = self.test_fn(description.class_name()).ok_or_else(|| {
            Error::UnknownTestClass {
                class_name: description.class_name().to_string(),
            }
        })?;

        notifier.fire_test_started(description);
        if let Err(e) = func(child.parameter()) {
            notifier.fire_test_failure(TestFailure::new(description.clone(), e));
        }
        notifier.fire_test_finished(description);
        Ok(())
    }
}
