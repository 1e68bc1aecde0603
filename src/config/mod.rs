//! Configuration module for mdxgen.
//!
//! Handles the settings file and compiler defaults.

mod settings;

pub use settings::{CompilerSettings, LoggingSettings, Settings, SettingsError};
