// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs.read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and run basic validation.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(fs, &path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the effective configuration.
///
/// - An explicit path must exist and be valid.
/// - Without one, [`default_config_path`] is used if present.
/// - Otherwise the built-in defaults apply.
pub fn load_or_default(fs: &dyn FileSystem, explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_and_validate(fs, path);
    }

    let default_path = default_config_path();
    if fs.is_file(&default_path) {
        debug!(path = ?default_path, "using default config file");
        return load_and_validate(fs, &default_path);
    }

    Ok(ConfigFile::default())
}

/// `Dagreduce.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Dagreduce.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReduceError;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn loads_and_validates_toml() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "cfg.toml",
            "[reduce]\nworkers = 4\n\n[output]\nseparator = \".part\"\n",
        );

        let cfg = load_and_validate(&fs, "cfg.toml").unwrap();
        assert_eq!(cfg.workers(), 4);
        assert_eq!(cfg.progress_every(), 100);
        assert_eq!(cfg.separator(), ".part");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let fs = MockFileSystem::new();
        fs.add_file("cfg.toml", "[reduce]\nthreads = 4\n");
        assert!(matches!(
            load_and_validate(&fs, "cfg.toml"),
            Err(ReduceError::TomlError(_))
        ));
    }

    #[test]
    fn missing_default_falls_back_to_builtin() {
        let fs = MockFileSystem::new();
        assert_eq!(load_or_default(&fs, None).unwrap(), ConfigFile::default());
    }

    #[test]
    fn default_file_is_picked_up_when_present() {
        let fs = MockFileSystem::new();
        fs.add_file(default_config_path(), "[reduce]\nworkers = 3\n");
        assert_eq!(load_or_default(&fs, None).unwrap().workers(), 3);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let fs = MockFileSystem::new();
        assert!(load_or_default(&fs, Some(Path::new("nope.toml"))).is_err());
    }
}
