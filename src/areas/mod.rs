//! Stateful comparison components
//!
//! - `comparison`: the controller owning settings, output and the merge session
//! - `engine`: exact and positional diff tiers behind one trait
//! - `options`: caller-facing comparison options and their resolution
//! - `pattern`: time-boxed validation of strip patterns
//! - `settings`: limits and budgets loaded with `confy`
//! - `worker`: background diff worker with ticketed requests and a timeout

pub mod comparison;
pub mod engine;
pub mod options;
pub(crate) mod pattern;
pub mod settings;
pub(crate) mod worker;
