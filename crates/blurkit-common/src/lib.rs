pub mod errors;

pub use errors::{BlurkitError, ConfigError, SupervisorError, WindowError};

pub type Result<T> = std::result::Result<T, BlurkitError>;
