use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use thiserror::Error;

use crate::{diagnostic::Severity, rule::Rule, rules::all_rules};

use super::{lint_config::LintConfigObject, RuleLevel, RuleSetting, DEFAULT_CONFIG_FILENAME};

/// Rule names may carry the plugin prefix, as in `modifiers/ensure-modifiers`.
const PLUGIN_PREFIX: &str = "modifiers/";

pub struct ResolvedLintConfig {
    pub rules: Vec<(Box<dyn Rule>, Severity)>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    origin: Option<PathBuf>,
    rules: HashMap<String, RuleSetting>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("rule {0} is configured more than once")]
    DuplicateRule(String),
    #[error("invalid rule setting for {rule}: {value}")]
    InvalidRuleSetting { rule: String, value: Value },
    #[error("invalid options for {rule}: {source}")]
    InvalidOptions {
        rule: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("rule `{location}` must be a list of modifiers or a nested mapping, found {value}")]
    InvalidRuleShape { location: String, value: Value },
}

impl ConfigStore {
    /// Loads `config_path`, or the default configuration file of `root_dir`
    /// when no path is given. Without either the default configuration is used.
    pub fn new(
        root_dir: impl Into<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let root_dir = root_dir.into();
        let (lint_config_object, origin) = load_config(&root_dir, config_path)?;
        Self::from_lint_config_object(lint_config_object, origin)
    }

    pub fn from_json_str(config_json: &str) -> Result<Self, ConfigError> {
        let lint_config_object = serde_json::from_str(config_json).map_err(ConfigError::Parse)?;
        Self::from_lint_config_object(lint_config_object, None)
    }

    fn from_lint_config_object(
        lint_config_object: LintConfigObject,
        origin: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let rules = parse_rules_map(lint_config_object.rules)?;
        Ok(Self { origin, rules })
    }

    /// The file this configuration was read from.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn setting(&self, rule_name: &str) -> Option<&RuleSetting> {
        self.rules.get(rule_name)
    }

    /// Builds every enabled rule with its configured options and severity.
    pub fn resolve(&self) -> Result<ResolvedLintConfig, ConfigError> {
        let mut resolved_rules = Vec::new();

        for (name, build) in all_rules() {
            let setting = self.rules.get(name);
            if setting.is_some_and(|setting| setting.level == RuleLevel::Off) {
                continue;
            }

            let rule = build(setting.and_then(|setting| setting.options.as_ref()))?;
            let severity = match setting.map(|setting| setting.level) {
                Some(RuleLevel::Warn) => Severity::Warning,
                Some(RuleLevel::Error) => Severity::Error,
                _ => rule.default_severity(),
            };

            log::debug!("rule {name} enabled with {severity:?}");
            resolved_rules.push((rule, severity));
        }

        Ok(ResolvedLintConfig {
            rules: resolved_rules,
        })
    }
}

fn load_config(
    root_dir: &Path,
    config_path: Option<PathBuf>,
) -> Result<(LintConfigObject, Option<PathBuf>), ConfigError> {
    if let Some(path) = config_path {
        let config = read_config_file(&path)?;
        return Ok((config, Some(path)));
    }

    let path = root_dir.join(DEFAULT_CONFIG_FILENAME);
    if path.exists() {
        let config = read_config_file(&path)?;
        return Ok((config, Some(path)));
    }

    Ok((LintConfigObject::default(), None))
}

fn read_config_file(path: &Path) -> Result<LintConfigObject, ConfigError> {
    let content =
        fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
    let config =
        serde_json::from_str(&content).map_err(|err| ConfigError::Json(path.to_path_buf(), err))?;
    Ok(config)
}

fn parse_rules_map(
    rules: HashMap<String, Value>,
) -> Result<HashMap<String, RuleSetting>, ConfigError> {
    let known: Vec<&str> = all_rules().into_iter().map(|(name, _)| name).collect();

    let mut parsed = HashMap::new();
    for (name, value) in rules {
        let setting = parse_rule_setting(&name, &value)?;
        let rule = name.strip_prefix(PLUGIN_PREFIX).unwrap_or(&name).to_string();
        if !known.contains(&rule.as_str()) {
            log::warn!("unknown rule `{rule}` in configuration");
        }
        // `rule` and `modifiers/rule` name the same rule
        if parsed.contains_key(&rule) {
            return Err(ConfigError::DuplicateRule(rule));
        }
        parsed.insert(rule, setting);
    }
    Ok(parsed)
}

fn parse_rule_setting(name: &str, value: &Value) -> Result<RuleSetting, ConfigError> {
    let invalid = || ConfigError::InvalidRuleSetting {
        rule: name.to_string(),
        value: value.clone(),
    };

    let (level, options) = match value {
        Value::Array(items) => match items.as_slice() {
            [level] => (level, None),
            [level, options] => (level, Some(options.clone())),
            _ => return Err(invalid()),
        },
        level => (level, None),
    };

    let level = parse_rule_level(level).ok_or_else(invalid)?;
    Ok(RuleSetting { level, options })
}

fn parse_rule_level(value: &Value) -> Option<RuleLevel> {
    match value {
        Value::String(text) => match text.as_str() {
            "off" => Some(RuleLevel::Off),
            "warn" | "warning" => Some(RuleLevel::Warn),
            "error" => Some(RuleLevel::Error),
            "0" => Some(RuleLevel::Off),
            "1" => Some(RuleLevel::Warn),
            "2" => Some(RuleLevel::Error),
            _ => None,
        },
        Value::Number(num) => match num.as_i64()? {
            0 => Some(RuleLevel::Off),
            1 => Some(RuleLevel::Warn),
            2 => Some(RuleLevel::Error),
            _ => None,
        },
        _ => None,
    }
}
