//! Command-line driver for the tsdl tools.

pub mod args;
pub mod config;
pub mod driver_links;
pub mod driver_process;
pub mod driver_transform;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/process_tests.rs"]
mod process_tests;
