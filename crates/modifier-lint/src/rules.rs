mod ensure_modifiers;

pub use ensure_modifiers::{EnsureModifiers, EnsureModifiersOptions};

use serde_json::Value;

use crate::{config::ConfigError, rule::Rule};

/// Builds a rule from the options of its configuration entry.
pub type RuleBuilder = fn(Option<&Value>) -> Result<Box<dyn Rule>, ConfigError>;

pub fn all_rules() -> Vec<(&'static str, RuleBuilder)> {
    vec![(EnsureModifiers::NAME, build_ensure_modifiers as RuleBuilder)]
}

pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(EnsureModifiers::default())]
}

fn build_ensure_modifiers(options: Option<&Value>) -> Result<Box<dyn Rule>, ConfigError> {
    Ok(Box::new(EnsureModifiers::from_options(options)?))
}
