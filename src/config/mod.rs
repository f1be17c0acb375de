pub mod error;
pub mod loader;
pub mod model;
pub mod schema;

pub use error::ConfigError;
pub use loader::load_config;
pub use model::{Configuration, Handler, ResultEntry};
pub use schema::SchemaViolation;
