pub mod epoch_summary;
pub mod run_config;
pub mod epoch_runner;

pub use epoch_summary::EpochSummary;
pub use run_config::RunConfig;
pub use epoch_runner::EpochRunner;
