pub mod hook;
pub mod config;
pub mod evaluate;

pub use hook::{EpochHook, EpochLogs, HookList};
pub use config::EvaluateConfig;
pub use evaluate::{EvaluateCallback, MAP_KEY};
