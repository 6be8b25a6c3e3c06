// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ReduceError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ReduceError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.reduce, raw.output))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_reduce(cfg)?;
    validate_output(cfg)?;
    Ok(())
}

fn validate_reduce(cfg: &RawConfigFile) -> Result<()> {
    if cfg.reduce.workers == 0 {
        return Err(ReduceError::InvalidArgument(
            "[reduce].workers must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.reduce.progress_every == 0 {
        return Err(ReduceError::ConfigError(
            "[reduce].progress_every must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_output(cfg: &RawConfigFile) -> Result<()> {
    if cfg.output.separator.is_empty() {
        return Err(ReduceError::ConfigError(
            "[output].separator must not be empty".to_string(),
        ));
    }
    if cfg.output.separator.contains(['/', '\\']) {
        return Err(ReduceError::ConfigError(format!(
            "[output].separator must not contain path separators (got {:?})",
            cfg.output.separator
        )));
    }
    if cfg.output.merge_prefix.is_empty() {
        return Err(ReduceError::ConfigError(
            "[output].merge_prefix must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{OutputSection, ReduceSection};

    fn raw(workers: usize, progress_every: usize, separator: &str) -> RawConfigFile {
        RawConfigFile {
            reduce: ReduceSection {
                workers,
                progress_every,
            },
            output: OutputSection {
                separator: separator.to_string(),
                ..OutputSection::default()
            },
        }
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = ConfigFile::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(cfg, ConfigFile::default());
        assert_eq!(cfg.workers(), 1);
        assert_eq!(cfg.progress_every(), 100);
        assert_eq!(cfg.separator(), "_");
        assert_eq!(cfg.merge_prefix(), "output_");
    }

    #[test]
    fn zero_workers_is_invalid_argument() {
        assert!(matches!(
            ConfigFile::try_from(raw(0, 100, "_")),
            Err(ReduceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn bad_output_settings_are_config_errors() {
        assert!(matches!(
            ConfigFile::try_from(raw(2, 100, "")),
            Err(ReduceError::ConfigError(_))
        ));
        assert!(matches!(
            ConfigFile::try_from(raw(2, 100, "/")),
            Err(ReduceError::ConfigError(_))
        ));
        assert!(matches!(
            ConfigFile::try_from(raw(2, 0, "_")),
            Err(ReduceError::ConfigError(_))
        ));
    }
}
