use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
    #[error("no value configured for parameter {parameter} of policy {policy}")]
    UnresolvedParameter { policy: String, parameter: String },
    #[error("invalid value for parameter {parameter} of policy {policy}: {message}")]
    InvalidParameter {
        policy: String,
        parameter: String,
        message: String,
    },
    #[error("policy {policy} is not available for {family} environments")]
    UnsupportedPolicy { policy: String, family: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Experiment(#[from] ExperimentError),
    #[error("failed to serialize report to JSON: {0}")]
    Report(#[from] serde_json::Error),
}
