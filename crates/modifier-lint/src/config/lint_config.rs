use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LintConfigObject {
    #[serde(default)]
    pub rules: HashMap<String, Value>,
}
