//! Layered configuration of the `predict` command.
//!
//! Values are resolved from command-line flags first, then `-S key=value` overrides, then
//! the TOML file, and finally [`defaults::DefaultsConfig`].

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
