//! # kosei
//!
//! Declarative configuration resolution with typed values, validation and provenance.
//!
//! ## Overview
//!
//! `kosei` resolves a fixed set of declared configuration variables from several
//! ordered sources:
//! - Environment files (`.env`, found by searching upward from the working directory)
//! - The process environment
//! - YAML/TOML/JSON files and in-memory default maps
//! - Explicit overrides passed to [`Configuration::bind`](core::Configuration::bind)
//!
//! Every resolved value keeps the raw text it was parsed from and the source
//! (and file path) that produced it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kosei::prelude::*;
//!
//! # fn example() -> kosei::error::Result<()> {
//! let mut config = Configuration::builder()
//!     .with_dotenv()
//!     .with_env()
//!     .build()?;
//!
//! config.declare(Declaration::new("PORT", Type::Integer))?;
//! config.declare(Declaration::new("DEBUG", Type::Boolean).optional())?;
//!
//! // Overrides always win over every configured reader
//! config.bind([("PORT", "8080")])?;
//! config.validate()?;
//!
//! let port = config.read("PORT")?;
//! println!("port {} from {}", port.value, port.source);
//! # Ok(())
//! # }
//! ```
//!
//! ## Precedence
//!
//! Readers run in the order they were added; a later reader wins over an earlier
//! one for the same name. Overrides given to `bind` are always applied last.
//!
//! ## Lifecycle
//!
//! `declare` → `bind` → `validate` → `read`. Values can only be read after a
//! successful `validate`; binding again invalidates the previous result.
//!
//! ## Feature Flags
//!
//! - `dotenv` (default): [`DotenvReader`](sources::DotenvReader)
//! - `console` (default): tabular rendering via [`console::Table`]
//! - `yaml`, `toml`, `json`: file formats for [`FileReader`](sources::FileReader)

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

#[cfg(feature = "console")]
pub mod console;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        Configuration, ConfigurationBuilder, Declaration, RawVar, ResolvedVariables, Source,
        State, Type, Validator, Value, Variable,
    };
    pub use crate::error::{ConfigError, Result, UsageError, ValidationError};
    pub use crate::sources::{EnvReader, FileReader, MapReader, Reader};

    #[cfg(feature = "dotenv")]
    pub use crate::sources::DotenvReader;
}
