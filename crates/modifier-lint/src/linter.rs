use crate::{
    config::{ConfigError, ConfigStore},
    context::LintContext,
    diagnostic::{Diagnostic, Severity},
    rule::Rule,
    rules::default_rules,
    source::SourceUnit,
    tree::collect_functions,
};

pub struct Linter {
    rules: Vec<(Box<dyn Rule>, Severity)>,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

impl Linter {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Runs `rules` at their default severity.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let severity = rule.default_severity();
                (rule, severity)
            })
            .collect();
        Self { rules }
    }

    pub fn from_config(config: &ConfigStore) -> Result<Self, ConfigError> {
        let resolved = config.resolve()?;
        Ok(Self {
            rules: resolved.rules,
        })
    }

    pub fn run(&self, unit: &SourceUnit) -> Vec<Diagnostic> {
        let functions = collect_functions(unit);
        let mut ctx = LintContext::new();

        for (rule, severity) in &self.rules {
            for item in &functions {
                rule.run_on_function(unit, item.contract, item.function, &mut ctx, *severity);
            }
        }

        ctx.into_diagnostics()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::source::{ContractDefinition, FunctionDefinition};

    pub fn run_with_rules(unit: &SourceUnit, rules: Vec<Box<dyn Rule>>) -> Vec<Diagnostic> {
        Linter::with_rules(rules).run(unit)
    }

    #[test]
    fn applies_configured_severity() {
        let config = ConfigStore::from_json_str(
            r#"{
                "rules": {
                    "ensure-modifiers": ["warn", { "required": { "*": ["onlyOwner"] } }]
                }
            }"#,
        )
        .expect("config");
        let linter = Linter::from_config(&config).expect("linter");

        let unit = SourceUnit::new("Vault.sol").with_contract(
            ContractDefinition::new("Vault", "contract")
                .with_function(FunctionDefinition::new("withdraw").visibility("external")),
        );
        let diagnostics = linter.run(&unit);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn default_linter_reports_nothing() {
        let unit = SourceUnit::new("Vault.sol").with_contract(
            ContractDefinition::new("Vault", "contract")
                .with_function(FunctionDefinition::new("withdraw")),
        );
        assert!(Linter::new().run(&unit).is_empty());
    }
}
