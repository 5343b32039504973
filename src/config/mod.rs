//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<PluckConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let config: PluckConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {:?}", path))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration if the file exists, otherwise use the built-in defaults
pub fn load_or_default(path: &Path) -> Result<PluckConfig> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!("no config at {:?}, using defaults", path);
        Ok(PluckConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::Algorithm;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
audio:
  sample_rate: 48000
  amplitude: 0.7

synth:
  algorithm: additive

progression:
  - name: Power
    notes: [E2, B2, E3]
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.audio.sample_rate, 48000);
        assert_eq!(config.audio.amplitude, 0.7);
        assert_eq!(config.synth.algorithm, Algorithm::Additive);
        assert_eq!(config.performance.beats_per_chord, 4);

        let chords = config.chords().unwrap();
        assert_eq!(chords.len(), 1);
        assert_eq!(chords[0].name(), "Power");
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"audio:\n  sample_rate: 100\n").unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"audio: [not, a, map\n").unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_or_default(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.progression.len(), 4);
    }

    #[test]
    fn test_missing_file_is_an_error_when_required() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_example_config_is_valid() {
        let config: PluckConfig =
            serde_yaml::from_str(include_str!("../../pluck.example.yaml")).unwrap();
        assert!(config.validate().is_ok());
    }
}
