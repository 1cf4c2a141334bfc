mod config_store;
mod lint_config;
mod merge;
mod types;

pub const DEFAULT_CONFIG_FILENAME: &str = ".modifierlintrc.json";

pub use config_store::{ConfigError, ConfigStore, ResolvedLintConfig};
pub use merge::merge_options;
pub use types::{RuleLevel, RuleSetting};
