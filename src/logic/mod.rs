//! Declarative condition trees
//!
//! A persona trigger's condition is configured as a recursive logic tree:
//! `all_of` / `any_of` / `none_of` operators over leaf sensors. The tree is
//! compiled once at persona-load time into a [`CompiledCondition`] and never
//! re-interpreted per message.

mod sensors;

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::message::Message;

/// One node of a configured logic tree
///
/// Exactly one operator or sensor key should be populated. When several are
/// present, precedence is `all_of` > `any_of` > `none_of` > sensor lookup.
/// A node with no recognized key compiles fail-closed to constant `false`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogicNode {
    /// True iff every child is true (empty list is true)
    #[serde(default)]
    pub all_of: Option<Vec<LogicNode>>,

    /// True iff any child is true (empty list is false)
    #[serde(default)]
    pub any_of: Option<Vec<LogicNode>>,

    /// True iff no child is true
    #[serde(default)]
    pub none_of: Option<Vec<LogicNode>>,

    /// Case-insensitive whole-word match
    #[serde(default)]
    pub contains_word: Option<String>,

    /// Case-insensitive substring match
    #[serde(default)]
    pub contains_phrase: Option<String>,

    /// Case-insensitive regex test over the full content
    #[serde(default)]
    pub matches_pattern: Option<String>,

    /// Exact author id match
    #[serde(default)]
    pub from_user: Option<String>,

    /// Uniform roll in [0, 100); true iff roll <= percent
    #[serde(default)]
    pub with_chance: Option<f64>,

    /// Unconditional result
    #[serde(default)]
    pub always: Option<bool>,
}

/// A logic tree compiled into a single message predicate
///
/// Cheap to clone; evaluation never panics and never performs I/O. Sensors
/// with randomness (`with_chance`) draw exactly once per evaluation.
#[derive(Clone)]
pub struct CompiledCondition(Arc<dyn Fn(&Message) -> bool + Send + Sync>);

impl fmt::Debug for CompiledCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompiledCondition(..)")
    }
}

impl CompiledCondition {
    /// Wrap a predicate function
    pub fn new(predicate: impl Fn(&Message) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Constant predicate
    #[must_use]
    pub fn constant(value: bool) -> Self {
        Self::new(move |_| value)
    }

    /// Evaluate against a message
    #[must_use]
    pub fn evaluate(&self, message: &Message) -> bool {
        (self.0)(message)
    }

    /// Short-circuit AND: children are evaluated in order and evaluation
    /// stops at the first `false`. An empty list is `true`.
    #[must_use]
    pub fn all_of(children: Vec<Self>) -> Self {
        Self::new(move |msg| children.iter().all(|c| c.evaluate(msg)))
    }

    /// Short-circuit OR: children are evaluated in order and evaluation
    /// stops at the first `true`. An empty list is `false`.
    #[must_use]
    pub fn any_of(children: Vec<Self>) -> Self {
        Self::new(move |msg| children.iter().any(|c| c.evaluate(msg)))
    }

    /// True iff no child matches: `NOT(any_of(children))`
    #[must_use]
    pub fn none_of(children: Vec<Self>) -> Self {
        let any = Self::any_of(children);
        Self::new(move |msg| !any.evaluate(msg))
    }
}

/// Compile a configured logic tree into one callable predicate
///
/// Compilation itself never fails: unrecognized or malformed nodes (unknown
/// sensor keys, invalid regex patterns) compile to constant `false` with a
/// diagnostic log, so a bad condition can only ever suppress its own
/// trigger.
#[must_use]
pub fn compile(node: &LogicNode) -> CompiledCondition {
    if let Some(children) = &node.all_of {
        return CompiledCondition::all_of(children.iter().map(compile).collect());
    }
    if let Some(children) = &node.any_of {
        return CompiledCondition::any_of(children.iter().map(compile).collect());
    }
    if let Some(children) = &node.none_of {
        return CompiledCondition::none_of(children.iter().map(compile).collect());
    }
    sensors::compile_sensor(node)
}
