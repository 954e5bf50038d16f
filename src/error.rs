use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("path is not a directory: {0}")]
    NotADirectory(String),

    #[error("not a git repository: {0}")]
    NotGitRepo(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl HealthError {
    /// Errors raised before analysis starts, caused by what the user passed in.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::PathNotFound(_)
                | Self::NotADirectory(_)
                | Self::NotGitRepo(_)
                | Self::ConfigParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HealthError>;
