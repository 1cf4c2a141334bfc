use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    config::{merge_options, ConfigError},
    context::LintContext,
    diagnostic::{Diagnostic, Severity},
    resolver::ModifierResolver,
    rule::Rule,
    rule_tree::{RuleTree, TagSet},
    source::{ContractDefinition, FunctionDefinition, SourceUnit},
};

const DEFAULT_IGNORE_VISIBILITY: &[&str] = &["internal"];
const DEFAULT_IGNORE_STATE_MUTABILITY: &[&str] = &["view", "pure"];
const DEFAULT_IGNORE_CONTRACT_KIND: &[&str] = &["abstract", "interface"];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureModifiersOptions {
    pub ignore_visibility: Vec<String>,
    pub ignore_state_mutability: Vec<String>,
    pub ignore_contract_kind: Vec<String>,
    #[serde(default)]
    pub required: Value,
    #[serde(default, rename = "override")]
    pub overrides: Value,
}

impl EnsureModifiersOptions {
    fn defaults() -> Value {
        json!({
            "ignoreVisibility": DEFAULT_IGNORE_VISIBILITY,
            "ignoreStateMutability": DEFAULT_IGNORE_STATE_MUTABILITY,
            "ignoreContractKind": DEFAULT_IGNORE_CONTRACT_KIND,
            "required": {},
            "override": {},
        })
    }

    /// Merges user options over the defaults.
    pub fn from_value(options: Option<&Value>) -> Result<Self, ConfigError> {
        let merged = match options {
            Some(options) if !options.is_null() => {
                merge_options(Self::defaults(), options.clone())
            }
            _ => Self::defaults(),
        };

        serde_json::from_value(merged).map_err(|source| ConfigError::InvalidOptions {
            rule: EnsureModifiers::NAME.to_string(),
            source,
        })
    }
}

/// Reports every modifier that the `required`/`override` trees demand of a
/// function but that the function does not apply.
#[derive(Debug, Clone)]
pub struct EnsureModifiers {
    ignore_visibility: Vec<String>,
    ignore_state_mutability: Vec<String>,
    ignore_contract_kind: Vec<String>,
    resolver: ModifierResolver,
}

impl Default for EnsureModifiers {
    fn default() -> Self {
        let owned =
            |values: &[&str]| -> Vec<String> { values.iter().map(|v| v.to_string()).collect() };
        Self {
            ignore_visibility: owned(DEFAULT_IGNORE_VISIBILITY),
            ignore_state_mutability: owned(DEFAULT_IGNORE_STATE_MUTABILITY),
            ignore_contract_kind: owned(DEFAULT_IGNORE_CONTRACT_KIND),
            resolver: ModifierResolver::default(),
        }
    }
}

impl EnsureModifiers {
    pub const NAME: &'static str = "ensure-modifiers";

    pub fn new(options: EnsureModifiersOptions) -> Result<Self, ConfigError> {
        let required = layer(&options.required, "required")?;
        let overrides = layer(&options.overrides, "override")?;

        Ok(Self {
            ignore_visibility: options.ignore_visibility,
            ignore_state_mutability: options.ignore_state_mutability,
            ignore_contract_kind: options.ignore_contract_kind,
            resolver: ModifierResolver::new(required, overrides),
        })
    }

    pub fn from_options(options: Option<&Value>) -> Result<Self, ConfigError> {
        Self::new(EnsureModifiersOptions::from_value(options)?)
    }

    pub fn resolver(&self) -> &ModifierResolver {
        &self.resolver
    }

    fn is_ignored(&self, contract: &ContractDefinition, function: &FunctionDefinition) -> bool {
        let listed =
            |list: &[String], value: Option<&String>| value.is_some_and(|v| list.contains(v));

        listed(&self.ignore_contract_kind, Some(&contract.kind))
            || listed(&self.ignore_visibility, function.visibility.as_ref())
            || listed(&self.ignore_state_mutability, function.state_mutability.as_ref())
    }

    /// Required modifiers that `function` does not apply yet.
    pub fn missing_modifiers(
        &self,
        file_name: &str,
        contract: &ContractDefinition,
        function: &FunctionDefinition,
    ) -> TagSet {
        let mut required = self
            .resolver
            .required_tags(file_name, &contract.name, &function.name);
        required.retain(|modifier| !function.has_modifier(modifier));
        required
    }
}

fn layer(value: &Value, name: &str) -> Result<RuleTree, ConfigError> {
    match value {
        Value::Null => Ok(RuleTree::default()),
        value => RuleTree::from_value(value, name),
    }
}

impl Rule for EnsureModifiers {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn run_on_function(
        &self,
        unit: &SourceUnit,
        contract: &ContractDefinition,
        function: &FunctionDefinition,
        ctx: &mut LintContext,
        severity: Severity,
    ) {
        if self.is_ignored(contract, function) {
            return;
        }

        for modifier in self.missing_modifiers(&unit.file_name, contract, function) {
            let message = format!(
                "Function `{}.{}` does not have required modifier `{modifier}`.",
                contract.name, function.name
            );
            let diagnostic =
                Diagnostic::new(self.name(), severity, message, unit, contract, function);
            ctx.report(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::tests::run_with_rules;

    fn rule(options: Value) -> Box<dyn Rule> {
        Box::new(EnsureModifiers::from_options(Some(&options)).expect("valid options"))
    }

    fn vault(function: FunctionDefinition) -> SourceUnit {
        SourceUnit::new("Vault.sol")
            .with_contract(ContractDefinition::new("Vault", "contract").with_function(function))
    }

    fn messages(unit: &SourceUnit, options: Value) -> Vec<String> {
        run_with_rules(unit, vec![rule(options)])
            .into_iter()
            .map(|diagnostic| diagnostic.message)
            .collect()
    }

    #[test]
    fn reports_each_missing_modifier() {
        let unit = vault(FunctionDefinition::new("withdraw").visibility("external"));
        let diagnostics = run_with_rules(
            &unit,
            vec![rule(json!({ "required": { "*.sol:Vault.*": ["onlyOwner", "nonReentrant"] } }))],
        );

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].rule_id, "ensure-modifiers");
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].file, "Vault.sol");
        assert_eq!(diagnostics[0].contract, "Vault");
        assert_eq!(diagnostics[0].function, "withdraw");
        assert_eq!(
            diagnostics[0].message,
            "Function `Vault.withdraw` does not have required modifier `nonReentrant`."
        );
        assert_eq!(
            diagnostics[1].message,
            "Function `Vault.withdraw` does not have required modifier `onlyOwner`."
        );
    }

    #[test]
    fn present_modifiers_are_not_reported() {
        let unit = vault(
            FunctionDefinition::new("withdraw")
                .visibility("external")
                .modifier("onlyOwner"),
        );

        assert_eq!(
            messages(
                &unit,
                json!({ "required": { "*": ["onlyOwner", "nonReentrant"] } })
            ),
            vec!["Function `Vault.withdraw` does not have required modifier `nonReentrant`."]
        );
    }

    #[test]
    fn unmatched_functions_are_clean() {
        let unit = vault(FunctionDefinition::new("withdraw").modifier("whenNotPaused"));
        assert!(messages(&unit, json!({ "required": { "Token.sol": ["onlyOwner"] } })).is_empty());
    }

    #[test]
    fn empty_override_cancels_requirement() {
        let unit = vault(FunctionDefinition::new("deposit").visibility("external"));
        let options = json!({
            "required": { "*": ["onlyOwner"] },
            "override": { "Vault.sol": { "Vault": { "deposit": [] } } }
        });
        assert!(messages(&unit, options).is_empty());
    }

    #[test]
    fn ignores_default_visibility_mutability_and_contract_kind() {
        let options = json!({ "required": { "*": ["onlyOwner"] } });

        let internal = vault(FunctionDefinition::new("_move").visibility("internal"));
        let view = vault(FunctionDefinition::new("balance").state_mutability("view"));
        let pure = vault(FunctionDefinition::new("sum").state_mutability("pure"));
        let interface = SourceUnit::new("IVault.sol").with_contract(
            ContractDefinition::new("IVault", "interface")
                .with_function(FunctionDefinition::new("withdraw")),
        );
        let abstract_contract = SourceUnit::new("Base.sol").with_contract(
            ContractDefinition::new("Base", "abstract")
                .with_function(FunctionDefinition::new("withdraw")),
        );

        for unit in [internal, view, pure, interface, abstract_contract] {
            assert!(messages(&unit, options.clone()).is_empty(), "{unit:?}");
        }

        let payable = vault(FunctionDefinition::new("deposit").state_mutability("payable"));
        assert_eq!(messages(&payable, options).len(), 1);
    }

    #[test]
    fn user_ignore_lists_replace_defaults() {
        let options = json!({
            "ignoreVisibility": ["private"],
            "required": { "*": ["onlyOwner"] }
        });

        let internal = vault(FunctionDefinition::new("_move").visibility("internal"));
        assert_eq!(messages(&internal, options.clone()).len(), 1);

        let private = vault(FunctionDefinition::new("_burn").visibility("private"));
        assert!(messages(&private, options).is_empty());
    }

    #[test]
    fn null_layers_are_empty() {
        let rule =
            EnsureModifiers::from_options(Some(&json!({ "required": null }))).expect("valid");
        assert!(rule.resolver().required().is_empty());
        assert!(rule.resolver().overrides().is_empty());
    }

    #[test]
    fn rejects_malformed_options() {
        let err = EnsureModifiers::from_options(Some(&json!({ "ignoreVisibility": "internal" })))
            .expect_err("string is not a list");
        assert!(matches!(
            err,
            ConfigError::InvalidOptions { rule, .. } if rule == "ensure-modifiers"
        ));

        let err = EnsureModifiers::from_options(Some(&json!({ "override": ["onlyOwner"] })))
            .expect_err("override must be a mapping");
        assert!(matches!(
            err,
            ConfigError::InvalidRuleShape { location, .. } if location == "override"
        ));
    }

    #[test]
    fn missing_modifiers_subtracts_present_ones() {
        let rule = EnsureModifiers::from_options(Some(&json!({
            "required": { "*.sol": { "Vault.withdraw": ["a"] }, "*.sol:Vault.withdraw": ["b", "c"] }
        })))
        .expect("valid");

        let contract = ContractDefinition::new("Vault", "contract");
        let function = FunctionDefinition::new("withdraw").modifier("b");
        let missing: Vec<String> = rule
            .missing_modifiers("Vault.sol", &contract, &function)
            .into_iter()
            .collect();
        assert_eq!(missing, vec!["a", "c"]);
    }
}
