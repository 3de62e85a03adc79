//! Persona configuration
//!
//! One YAML document per persona, parsed into [`BotConfigFile`] and turned
//! into an immutable [`BotDefinition`] by the factory step. Configuration
//! errors are fatal at load time: a persona that cannot be fully resolved
//! indicates an authoring bug, not a runtime condition.

mod loader;

pub use loader::{discover_bot_configs, load_bots};

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::bots::{BotDefinition, Trigger};
use crate::identity::IdentitySpec;
use crate::logic::{self, LogicNode};
use crate::response::{ResponseGenerator, ResponseSpec};
use crate::{Error, Result};

/// Named dynamic generators available to persona configs
pub type GeneratorMap = HashMap<String, Arc<dyn ResponseGenerator>>;

/// A response pool configured as either a single string or a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponsePool {
    /// Single literal reply
    One(String),
    /// Ordered list of alternatives
    Many(Vec<String>),
}

impl ResponsePool {
    /// Flatten into a list of alternatives
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(text) => vec![text],
            Self::Many(entries) => entries,
        }
    }
}

/// One trigger entry in a persona file
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerConfig {
    /// Trigger name, used in diagnostics
    pub name: String,

    /// Declared priority; only consulted when the persona opts into
    /// priority ordering
    #[serde(default)]
    pub priority: i64,

    /// Condition tree
    #[serde(default)]
    pub conditions: LogicNode,

    /// Trigger-level response pool, overriding the persona default
    #[serde(default)]
    pub responses: Option<ResponsePool>,

    /// Named dynamic generator, overriding any literal pool
    #[serde(default)]
    pub generator: Option<String>,
}

/// Top-level persona file schema
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfigFile {
    /// Unique persona name
    pub name: String,

    /// Skip messages authored by bot accounts
    #[serde(default = "default_true")]
    pub ignore_bots: bool,

    /// Skip messages authored by human accounts
    #[serde(default)]
    pub ignore_humans: bool,

    /// Sort triggers by descending priority at load time instead of
    /// dispatching in declaration order
    #[serde(default)]
    pub order_triggers_by_priority: bool,

    /// Identity strategy; a persona cannot be registered without one
    pub identity: IdentitySpec,

    /// Persona-level default response pool
    #[serde(default)]
    pub responses: Option<ResponsePool>,

    /// Persona-level default generator
    #[serde(default)]
    pub generator: Option<String>,

    /// Triggers, in declaration order
    #[serde(default)]
    pub triggers: Vec<TriggerConfig>,
}

fn default_true() -> bool {
    true
}

/// Build an immutable persona definition from its parsed config
///
/// Compiles every trigger's condition tree once and resolves generator
/// names against the provided map.
///
/// # Errors
///
/// Returns a configuration error when a referenced generator is unknown.
pub fn build_definition(config: BotConfigFile, generators: &GeneratorMap) -> Result<BotDefinition> {
    let default_responses = build_spec(
        &config.name,
        config.responses,
        config.generator.as_deref(),
        generators,
    )?;

    let mut triggers = Vec::with_capacity(config.triggers.len());
    for trigger in config.triggers {
        let condition = logic::compile(&trigger.conditions);
        let response = build_spec(
            &config.name,
            trigger.responses,
            trigger.generator.as_deref(),
            generators,
        )?;

        triggers.push(Trigger {
            name: trigger.name,
            condition,
            response,
            priority: trigger.priority,
        });
    }

    if config.order_triggers_by_priority {
        // Stable sort: equal priorities keep declaration order
        triggers.sort_by_key(|t| std::cmp::Reverse(t.priority));
    }

    tracing::info!(
        persona = %config.name,
        triggers = triggers.len(),
        by_priority = config.order_triggers_by_priority,
        "persona definition built"
    );

    Ok(BotDefinition {
        name: config.name,
        identity: config.identity,
        triggers,
        default_responses,
        ignore_bots: config.ignore_bots,
        ignore_humans: config.ignore_humans,
    })
}

/// Resolve a (pool, generator-name) config pair into a response spec
///
/// A named generator takes precedence over a literal pool.
fn build_spec(
    persona: &str,
    pool: Option<ResponsePool>,
    generator: Option<&str>,
    generators: &GeneratorMap,
) -> Result<Option<ResponseSpec>> {
    if let Some(name) = generator {
        let generator = generators.get(name).ok_or_else(|| {
            Error::Config(format!("persona '{persona}' references unknown generator '{name}'"))
        })?;
        return Ok(Some(ResponseSpec::Generator(generator.clone())));
    }

    Ok(pool.map(|p| ResponseSpec::Pool(p.into_vec())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PERSONA: &str = r"
name: crocodile
identity:
  type: static
  bot_name: Crocodile
  avatar_url: https://cdn.example/croc.png
responses:
  - later alligator
triggers:
  - name: gator
    priority: 5
    conditions:
      contains_word: gator
    responses: see ya
  - name: fallback
    priority: 10
    conditions:
      always: true
";

    #[test]
    fn parses_full_persona_file() {
        let config: BotConfigFile = serde_yaml::from_str(FULL_PERSONA).unwrap();

        assert_eq!(config.name, "crocodile");
        assert!(config.ignore_bots);
        assert!(!config.ignore_humans);
        assert!(!config.order_triggers_by_priority);
        assert_eq!(config.triggers.len(), 2);
        assert_eq!(config.triggers[0].priority, 5);
        assert!(matches!(config.identity, IdentitySpec::Static { .. }));
    }

    #[test]
    fn missing_identity_is_a_parse_error() {
        let yaml = "name: nameless\nresponses: hi\n";
        assert!(serde_yaml::from_str::<BotConfigFile>(yaml).is_err());
    }

    #[test]
    fn single_string_pool_flattens() {
        let pool: ResponsePool = serde_yaml::from_str("just one").unwrap();
        assert_eq!(pool.into_vec(), vec!["just one".to_string()]);
    }

    #[test]
    fn declaration_order_is_kept_by_default() {
        let config: BotConfigFile = serde_yaml::from_str(FULL_PERSONA).unwrap();
        let definition = build_definition(config, &GeneratorMap::new()).unwrap();

        let names: Vec<_> = definition.triggers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["gator", "fallback"]);
    }

    #[test]
    fn priority_toggle_sorts_descending() {
        let mut config: BotConfigFile = serde_yaml::from_str(FULL_PERSONA).unwrap();
        config.order_triggers_by_priority = true;
        let definition = build_definition(config, &GeneratorMap::new()).unwrap();

        let names: Vec<_> = definition.triggers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["fallback", "gator"]);
    }

    #[test]
    fn unknown_generator_is_a_config_error() {
        let yaml = r"
name: dreamer
identity:
  type: random
generator: missing-llm
";
        let config: BotConfigFile = serde_yaml::from_str(yaml).unwrap();
        let err = build_definition(config, &GeneratorMap::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn mimic_identity_parses() {
        let yaml = r"
name: copycat
identity:
  type: mimic
  as_member: '123456'
";
        let config: BotConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.identity,
            IdentitySpec::Mimic { ref as_member } if as_member == "123456"
        ));
    }
}
