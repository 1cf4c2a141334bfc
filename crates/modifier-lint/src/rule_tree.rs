use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::{config::ConfigError, matcher::Pattern};

pub type TagSet = BTreeSet<String>;

/// Value bound to a pattern: either the tags it requires or a deeper level.
#[derive(Debug, Clone)]
pub enum RuleNode {
    Terminal(Vec<String>),
    Branch(RuleTree),
}

#[derive(Debug, Clone)]
struct RuleEntry {
    pattern: Pattern,
    node: RuleNode,
}

/// Nested mapping from glob pattern to [`RuleNode`], in configuration order.
#[derive(Debug, Clone, Default)]
pub struct RuleTree {
    entries: IndexMap<String, RuleEntry>,
}

impl RuleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule bound to `pattern`.
    pub fn insert(&mut self, pattern: impl Into<String>, node: RuleNode) {
        let pattern = pattern.into();
        self.entries.insert(
            pattern.clone(),
            RuleEntry {
                pattern: Pattern::new(pattern),
                node,
            },
        );
    }

    pub fn with_tags<I, S>(mut self, pattern: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(
            pattern,
            RuleNode::Terminal(tags.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn with_branch(mut self, pattern: impl Into<String>, subtree: RuleTree) -> Self {
        self.insert(pattern, RuleNode::Branch(subtree));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a tree from its JSON form. `location` names the tree in errors.
    pub fn from_value(value: &Value, location: &str) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::InvalidRuleShape {
                location: location.to_string(),
                value: value.clone(),
            });
        };

        let mut tree = RuleTree::new();
        for (key, value) in map {
            let location = format!("{location} > {key}");
            let node = match value {
                Value::Array(items) => RuleNode::Terminal(parse_tags(items, &location)?),
                Value::Object(_) => RuleNode::Branch(RuleTree::from_value(value, &location)?),
                other => {
                    return Err(ConfigError::InvalidRuleShape {
                        location,
                        value: other.clone(),
                    })
                }
            };
            tree.insert(key.clone(), node);
        }
        Ok(tree)
    }

    /// The top level of this tree, ready to be matched.
    pub fn level(&self) -> Level<'_> {
        let mut level = Level::default();
        level.merge(self);
        level
    }
}

fn parse_tags(items: &[Value], location: &str) -> Result<Vec<String>, ConfigError> {
    items
        .iter()
        .map(|item| match item {
            Value::String(tag) => Ok(tag.clone()),
            other => Err(ConfigError::InvalidRuleShape {
                location: location.to_string(),
                value: other.clone(),
            }),
        })
        .collect()
}

/// One level of a tree. Nested levels are the merge of every branch that
/// matched the previous component; a later branch replaces the value of a key
/// that an earlier one already contributed.
#[derive(Debug, Clone, Default)]
pub struct Level<'a> {
    entries: IndexMap<&'a str, &'a RuleEntry>,
}

impl<'a> Level<'a> {
    fn merge(&mut self, tree: &'a RuleTree) {
        for (key, entry) in &tree.entries {
            self.entries.insert(key.as_str(), entry);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tests `component` against every key of this level.
    pub fn match_component(&self, component: &str) -> MatchResult<'a> {
        let mut result = MatchResult::default();

        for &entry in self.entries.values() {
            if !entry.pattern.matches(component) {
                continue;
            }

            log::trace!("`{}` matched `{component}`", entry.pattern.as_str());
            match &entry.node {
                RuleNode::Terminal(tags) => {
                    result.matched = true;
                    result.tags.extend(tags.iter().cloned());
                }
                RuleNode::Branch(subtree) => result.nested.merge(subtree),
            }
        }

        result
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchResult<'a> {
    pub tags: TagSet,
    pub nested: Level<'a>,
    /// Set when at least one terminal rule matched, even one without tags.
    pub matched: bool,
}

pub fn match_at_level<'a>(level: &Level<'a>, component: &str) -> MatchResult<'a> {
    level.match_component(component)
}

/// One way of addressing an entity, from the outermost component inwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupPath {
    components: Vec<String>,
}

impl LookupPath {
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            components: vec![first.into()],
        }
    }

    pub fn then(mut self, component: impl Into<String>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub tags: TagSet,
    pub matched: bool,
}

impl Resolution {
    pub fn matched(tags: TagSet) -> Self {
        Self {
            tags,
            matched: true,
        }
    }
}

/// Combines the resolutions produced while walking one tree.
pub trait Reducer {
    fn reduce(&self, acc: Resolution, step: Resolution) -> Resolution;

    /// Whether `acc` can no longer change, which ends the walk early.
    fn is_settled(&self, _acc: &Resolution) -> bool {
        false
    }
}

/// Every match contributes its tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Union;

impl Reducer for Union {
    fn reduce(&self, mut acc: Resolution, step: Resolution) -> Resolution {
        acc.tags.extend(step.tags);
        acc.matched |= step.matched;
        acc
    }
}

/// The first match wins and everything after it is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl Reducer for FirstMatch {
    fn reduce(&self, acc: Resolution, step: Resolution) -> Resolution {
        if acc.matched || !step.matched {
            acc
        } else {
            step
        }
    }

    fn is_settled(&self, acc: &Resolution) -> bool {
        acc.matched
    }
}

/// Walks `path` through `tree` one component per level.
///
/// A component that matches a terminal rule still descends into the branches
/// it matched on the same level.
pub fn walk_path<R: Reducer + ?Sized>(
    tree: &RuleTree,
    path: &LookupPath,
    reducer: &R,
) -> Resolution {
    let mut acc = Resolution::default();
    let mut level = tree.level();

    for component in path.components() {
        if level.is_empty() || reducer.is_settled(&acc) {
            break;
        }

        let result = level.match_component(component);
        if result.matched {
            acc = reducer.reduce(acc, Resolution::matched(result.tags));
        }
        level = result.nested;
    }

    acc
}

/// Walks every candidate path in priority order and folds their resolutions.
pub fn resolve_across_paths<R: Reducer + ?Sized>(
    tree: &RuleTree,
    paths: &[LookupPath],
    reducer: &R,
) -> Resolution {
    let mut acc = Resolution::default();

    for path in paths {
        if reducer.is_settled(&acc) {
            break;
        }
        acc = reducer.reduce(acc, walk_path(tree, path, reducer));
    }

    acc
}
