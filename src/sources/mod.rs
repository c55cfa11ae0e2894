//! Reader implementations.

#[cfg(feature = "dotenv")]
mod dotenv;
mod env;
mod file;
mod map;
mod reader;

#[cfg(feature = "dotenv")]
pub use dotenv::DotenvReader;
pub use env::EnvReader;
pub use file::FileReader;
pub use map::MapReader;
pub use reader::Reader;
