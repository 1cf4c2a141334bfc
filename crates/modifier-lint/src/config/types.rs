use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub level: RuleLevel,
    /// Second element of an `[level, options]` setting.
    pub options: Option<Value>,
}
