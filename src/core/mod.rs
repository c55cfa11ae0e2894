//! Core configuration resolution types.

mod builder;
mod config_handle;
mod declaration;
mod loader;
mod resolve;
pub mod validation;
mod value;
mod variable;

pub use builder::ConfigurationBuilder;
pub use config_handle::{Configuration, State};
pub use declaration::Declaration;
pub(crate) use loader::ConfigLoader;
pub use validation::{Rejection, Validator};
pub use value::{Type, Value};
pub use variable::{RawVar, ResolvedVariables, Source, Variable};
