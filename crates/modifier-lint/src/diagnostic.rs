use serde::Deserialize;

use crate::source::{ContractDefinition, FunctionDefinition, SourceUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Zero-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SourceSpan {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub rule_id: &'static str,
    pub message: String,
    pub severity: Severity,
    pub file: String,
    pub contract: String,
    pub function: String,
    pub span: Option<SourceSpan>,
}

impl Diagnostic {
    pub fn new(
        rule_id: &'static str,
        severity: Severity,
        message: impl Into<String>,
        unit: &SourceUnit,
        contract: &ContractDefinition,
        function: &FunctionDefinition,
    ) -> Self {
        Self {
            rule_id,
            severity,
            message: message.into(),
            file: unit.file_name.clone(),
            contract: contract.name.clone(),
            function: function.name.clone(),
            span: function.span,
        }
    }
}
