use crate::rule_tree::{resolve_across_paths, FirstMatch, LookupPath, RuleTree, TagSet, Union};

/// Resolves the modifiers a function must carry from the `override` and
/// `required` rule trees.
#[derive(Debug, Clone, Default)]
pub struct ModifierResolver {
    required: RuleTree,
    overrides: RuleTree,
}

impl ModifierResolver {
    pub fn new(required: RuleTree, overrides: RuleTree) -> Self {
        Self {
            required,
            overrides,
        }
    }

    pub fn required(&self) -> &RuleTree {
        &self.required
    }

    pub fn overrides(&self) -> &RuleTree {
        &self.overrides
    }

    /// Addressings of one function, most specific first.
    pub fn candidate_paths(
        file_name: &str,
        contract_name: &str,
        function_name: &str,
    ) -> [LookupPath; 4] {
        let qualified_contract = format!("{file_name}:{contract_name}");
        let contract_method = format!("{contract_name}.{function_name}");

        [
            LookupPath::new(format!("{qualified_contract}.{function_name}")),
            LookupPath::new(qualified_contract).then(function_name),
            LookupPath::new(file_name).then(contract_method),
            LookupPath::new(file_name)
                .then(contract_name)
                .then(function_name),
        ]
    }

    /// The first override that matches replaces everything else, including an
    /// override without tags. Otherwise every matching `required` rule adds its
    /// tags.
    pub fn required_tags(
        &self,
        file_name: &str,
        contract_name: &str,
        function_name: &str,
    ) -> TagSet {
        let paths = Self::candidate_paths(file_name, contract_name, function_name);

        let overridden = resolve_across_paths(&self.overrides, &paths, &FirstMatch);
        if overridden.matched {
            log::debug!(
                "override applies to {file_name}:{contract_name}.{function_name}: {:?}",
                overridden.tags
            );
            return overridden.tags;
        }

        resolve_across_paths(&self.required, &paths, &Union).tags
    }
}
