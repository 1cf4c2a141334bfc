//! Context tree handed over by the source parser.

use serde::Deserialize;

use crate::diagnostic::SourceSpan;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUnit {
    pub file_name: String,
    #[serde(default)]
    pub contracts: Vec<ContractDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDefinition {
    pub name: String,
    /// `contract`, `abstract`, `interface`, `library`, ...
    #[serde(default = "default_contract_kind")]
    pub kind: String,
    #[serde(default)]
    pub functions: Vec<FunctionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub state_mutability: Option<String>,
    /// Modifiers already applied to the function.
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub span: Option<SourceSpan>,
}

fn default_contract_kind() -> String {
    "contract".to_string()
}

impl SourceUnit {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contracts: Vec::new(),
        }
    }

    pub fn with_contract(mut self, contract: ContractDefinition) -> Self {
        self.contracts.push(contract);
        self
    }
}

impl ContractDefinition {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            functions: Vec::new(),
        }
    }

    pub fn with_function(mut self, function: FunctionDefinition) -> Self {
        self.functions.push(function);
        self
    }
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: None,
            state_mutability: None,
            modifiers: Vec::new(),
            span: None,
        }
    }

    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    pub fn state_mutability(mut self, state_mutability: impl Into<String>) -> Self {
        self.state_mutability = Some(state_mutability.into());
        self
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn has_modifier(&self, name: &str) -> bool {
        self.modifiers.iter().any(|modifier| modifier == name)
    }
}
