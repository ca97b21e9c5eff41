pub mod config;
pub mod default_configuration;
pub mod error;
pub mod logger;
pub mod token_store;

pub use error::Result;
