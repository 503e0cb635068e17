//! Suite execution module

pub mod expansion;
pub mod runner;

// Re-export public types
pub use expansion::{Expansion, ParameterizedExpansion, TestChild, TestFn};
pub use runner::{LauncherFn, SuiteRunner, UNDEFINED_FIRST_CLASS};
