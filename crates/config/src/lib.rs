//! Layered configuration for novelfetch.
//!
//! Values are resolved from, in increasing order of precedence:
//!
//! 1. built-in defaults,
//! 2. a config file (TOML, YAML or JSON, chosen by extension),
//! 3. `NOVELFETCH_*` environment variables (`__` separates nested keys, so
//!    `NOVELFETCH_CONVERTER__DIRECTORY` sets `converter.directory`),
//! 4. command-line [`Overrides`].

mod config;
pub mod error;

pub use crate::config::{Config, ConverterConfig, Overrides};
