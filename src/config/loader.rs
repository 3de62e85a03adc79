//! Persona directory discovery
//!
//! Scans a directory for `*.yaml` / `*.yml` persona files once at startup.
//! Any unreadable or unparsable file aborts the load: persona files are
//! authored configuration, and a broken one is a bug to surface, not to
//! skip.

use std::path::Path;

use super::{BotConfigFile, GeneratorMap, build_definition};
use crate::bots::BotDefinition;
use crate::{Error, Result};

/// Discover and parse every persona file in a directory
///
/// Files are visited in lexicographic filename order so registration order
/// is deterministic across runs.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or any persona file
/// fails to parse.
pub fn discover_bot_configs(dir: &Path) -> Result<Vec<BotConfigFile>> {
    if !dir.exists() {
        return Err(Error::Config(format!(
            "persona directory does not exist: {}",
            dir.display()
        )));
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    paths.sort();

    let mut configs = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path)?;
        let config: BotConfigFile = serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse {}: {e}", path.display()))
        })?;

        tracing::info!(
            persona = %config.name,
            path = %path.display(),
            "discovered persona config"
        );
        configs.push(config);
    }

    Ok(configs)
}

/// Discover, parse and factory-construct every persona in a directory
///
/// # Errors
///
/// Returns an error on any discovery, parse or factory failure.
pub fn load_bots(dir: &Path, generators: &GeneratorMap) -> Result<Vec<BotDefinition>> {
    discover_bot_configs(dir)?
        .into_iter()
        .map(|config| build_definition(config, generators))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const VALID: &str = r"
name: crocodile
identity:
  type: static
  bot_name: Crocodile
responses: later alligator
triggers:
  - name: gator
    conditions:
      contains_word: gator
";

    #[test]
    fn discovers_yaml_files_in_filename_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.yaml"), VALID.replace("crocodile", "b-bot")).unwrap();
        fs::write(dir.path().join("a.yml"), VALID.replace("crocodile", "a-bot")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a persona").unwrap();

        let configs = discover_bot_configs(dir.path()).unwrap();

        let names: Vec<_> = configs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a-bot", "b-bot"]);
    }

    #[test]
    fn malformed_file_aborts_the_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.yaml"), VALID).unwrap();
        fs::write(dir.path().join("bad.yaml"), "name: [unterminated").unwrap();

        assert!(matches!(
            discover_bot_configs(dir.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_identity_aborts_the_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nameless.yaml"), "name: nameless\n").unwrap();

        assert!(matches!(
            discover_bot_configs(dir.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(discover_bot_configs(&missing).is_err());
    }

    #[test]
    fn load_bots_compiles_triggers() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("croc.yaml"), VALID).unwrap();

        let definitions = load_bots(dir.path(), &GeneratorMap::new()).unwrap();

        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "crocodile");
        assert_eq!(definitions[0].triggers.len(), 1);
    }
}
