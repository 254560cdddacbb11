use crate::envs::Scenario;
use crate::expe::Experiment;
use crate::policies::ParameterTable;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct ExperimentConfig {
    pub scenario: Scenario,
    pub policies: Vec<String>,
    #[serde(default)]
    pub parameters: ParameterTable,
    pub horizon: usize,
    pub repetitions: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub experiment: ExperimentConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config"))
            .add_source(Environment::with_prefix("APP"))
            .build()?;

        builder.try_deserialize()
    }
}

impl From<ExperimentConfig> for Experiment {
    fn from(config: ExperimentConfig) -> Self {
        Experiment::new(
            config.scenario,
            config.policies,
            config.parameters,
            config.horizon,
            config.repetitions,
            config.seed,
        )
    }
}
