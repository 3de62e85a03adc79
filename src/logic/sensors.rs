//! Leaf sensors: primitive predicates over a single message

use rand::Rng;
use regex::Regex;

use super::{CompiledCondition, LogicNode};

/// Compile the sensor key of a logic node
///
/// Lookup order: `contains_word`, `contains_phrase`, `matches_pattern`,
/// `from_user`, `with_chance`, `always`. A node with no recognized key
/// compiles to constant `false`.
pub(super) fn compile_sensor(node: &LogicNode) -> CompiledCondition {
    if let Some(word) = &node.contains_word {
        return contains_word(word);
    }
    if let Some(phrase) = &node.contains_phrase {
        return contains_phrase(phrase);
    }
    if let Some(source) = &node.matches_pattern {
        return matches_pattern(source);
    }
    if let Some(user_id) = &node.from_user {
        return from_user(user_id);
    }
    if let Some(percent) = node.with_chance {
        return with_chance(percent);
    }
    if let Some(value) = node.always {
        return CompiledCondition::constant(value);
    }

    tracing::warn!("unrecognized condition node, compiling to constant false");
    CompiledCondition::constant(false)
}

/// Case-insensitive whole-word match
///
/// The word is interpolated into a `\b`-bounded pattern as-is; words are
/// trusted config and not escaped.
fn contains_word(word: &str) -> CompiledCondition {
    compile_regex(&format!(r"(?i)\b{word}\b"))
}

/// Case-insensitive substring containment
fn contains_phrase(phrase: &str) -> CompiledCondition {
    let needle = phrase.to_lowercase();
    CompiledCondition::new(move |msg| msg.content.to_lowercase().contains(&needle))
}

/// Case-insensitive regex test of a raw configured pattern
fn matches_pattern(source: &str) -> CompiledCondition {
    compile_regex(&format!("(?i){source}"))
}

/// Exact author id equality
fn from_user(user_id: &str) -> CompiledCondition {
    let expected = user_id.to_string();
    CompiledCondition::new(move |msg| msg.author.id == expected)
}

/// Probability roll: one uniform draw in [0, 100) per evaluation
fn with_chance(percent: f64) -> CompiledCondition {
    CompiledCondition::new(move |_| {
        let roll = rand::thread_rng().gen_range(0.0..100.0);
        roll <= percent
    })
}

/// Compile a regex sensor, falling back to constant `false` on a bad pattern
fn compile_regex(pattern: &str) -> CompiledCondition {
    match Regex::new(pattern) {
        Ok(regex) => CompiledCondition::new(move |msg| regex.is_match(&msg.content)),
        Err(e) => {
            tracing::warn!(
                pattern = %pattern,
                error = %e,
                "invalid condition pattern, compiling to constant false"
            );
            CompiledCondition::constant(false)
        }
    }
}
