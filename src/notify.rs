//! Run notifications: child descriptions, failures, and listeners

use std::fmt;

use crate::error::Error;

/// Identity of one expanded, runnable child test
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChildDescription {
    class_name: String,
    display_name: String,
}

impl ChildDescription {
    /// Create a description from a simple class name and a display name
    pub fn new(class_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        ChildDescription {
            class_name: class_name.into(),
            display_name: display_name.into(),
        }
    }

    /// The simple class name, as matched by class filters
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The display name, unique per expanded child
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl fmt::Display for ChildDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// A reported failure of one child
#[derive(Debug)]
pub struct TestFailure {
    /// Which child failed
    pub description: ChildDescription,
    /// What went wrong
    pub error: Error,
}

impl TestFailure {
    /// Create a failure scoped to one child's description
    pub fn new(description: ChildDescription, error: Error) -> Self {
        TestFailure { description, error }
    }
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.description, self.error)
    }
}

/// Listener for per-child run events.
///
/// The standard child-execution path fires started/finished around each
/// child and reports ordinary test failures itself; the suite runner only
/// synthesizes failures for faults that escape that path.
pub trait RunNotifier {
    /// A child is about to execute
    fn fire_test_started(&mut self, description: &ChildDescription);

    /// A child finished executing, whether it passed or failed
    fn fire_test_finished(&mut self, description: &ChildDescription);

    /// A child failed
    fn fire_test_failure(&mut self, failure: TestFailure);
}

/// Notifier that prints progress lines to the console.
///
/// With the `colors` feature enabled, failure lines are printed in red when
/// stderr is a terminal.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Create a console notifier
    pub fn new() -> Self {
        ConsoleNotifier
    }
}

impl RunNotifier for ConsoleNotifier {
    fn fire_test_started(&mut self, description: &ChildDescription) {
        println!("=== RUN   {}", description);
    }

    fn fire_test_finished(&mut self, description: &ChildDescription) {
        println!("--- DONE  {}", description);
    }

    fn fire_test_failure(&mut self, failure: TestFailure) {
        write_failure_line(&failure);
    }
}

#[cfg(feature = "colors")]
fn write_failure_line(failure: &TestFailure) {
    use std::io::Write;
    use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

    let choice = if atty::is(atty::Stream::Stderr) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = writeln!(stderr, "--- FAIL  {}", failure);
    let _ = stderr.reset();
}

#[cfg(not(feature = "colors"))]
fn write_failure_line(failure: &TestFailure) {
    eprintln!("--- FAIL  {}", failure);
}
