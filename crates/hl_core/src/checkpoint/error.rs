use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckpointError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column '{name}' in event log row {row}")]
    MissingColumn { name: &'static str, row: usize },

    #[error("bad value in event log row {row}: {message}")]
    BadValue { row: usize, message: String },
}

pub type Result<T> = std::result::Result<T, CheckpointError>;
