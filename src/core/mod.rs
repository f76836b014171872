pub mod config;
pub mod errors;
pub mod logging;

pub use config::Settings;
pub use errors::ApiError;
