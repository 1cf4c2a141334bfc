use crate::{
    context::LintContext,
    diagnostic::Severity,
    source::{ContractDefinition, FunctionDefinition, SourceUnit},
};

pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;
    fn default_severity(&self) -> Severity;
    fn run_on_function(
        &self,
        _unit: &SourceUnit,
        _contract: &ContractDefinition,
        _function: &FunctionDefinition,
        _ctx: &mut LintContext,
        _severity: Severity,
    ) {
    }
}
