use mab_bench::config::AppConfig;
use mab_bench::errors::AppError;
use mab_bench::expe::Experiment;

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let experiment = Experiment::from(config.experiment);
    let matrix = experiment.run()?;
    let report = matrix.mean_over_repetitions();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
