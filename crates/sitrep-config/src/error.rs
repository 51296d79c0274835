use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or did not match the expected shape.
    #[error("cannot load sitrep configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A value loaded fine but the pipeline cannot run with it.
    #[error("invalid sitrep configuration: {field} {reason}")]
    InvalidValue { field: String, reason: String },
}
