mod config;
mod context;
mod diagnostic;
mod linter;
mod matcher;
mod resolver;
mod rule;
mod rule_tree;
mod rules;
mod source;
mod tree;

pub use config::{
    merge_options, ConfigError, ConfigStore, ResolvedLintConfig, RuleLevel, RuleSetting,
    DEFAULT_CONFIG_FILENAME,
};
pub use context::LintContext;
pub use diagnostic::{Diagnostic, Position, Severity, SourceSpan};
pub use linter::Linter;
pub use matcher::Pattern;
pub use resolver::ModifierResolver;
pub use rule::Rule;
pub use rule_tree::{
    match_at_level, resolve_across_paths, walk_path, FirstMatch, Level, LookupPath, MatchResult,
    Reducer, Resolution, RuleNode, RuleTree, TagSet, Union,
};
pub use rules::{EnsureModifiers, EnsureModifiersOptions};
pub use source::{ContractDefinition, FunctionDefinition, SourceUnit};
pub use tree::{collect_functions, FunctionRef};
