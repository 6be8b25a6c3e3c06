// src/config/model.rs

use serde::Deserialize;

use crate::io::merge::DEFAULT_MERGE_PREFIX;
use crate::reduce::reducer::DEFAULT_PROGRESS_EVERY;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [reduce]
/// workers = 4
/// progress_every = 100
///
/// [output]
/// separator = "_"
/// merge_prefix = "output_"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Reduction settings from `[reduce]`.
    #[serde(default)]
    pub reduce: ReduceSection,

    /// Artifact naming from `[output]`.
    #[serde(default)]
    pub output: OutputSection,
}

/// `[reduce]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReduceSection {
    /// Number of workers, each with its own copy of the graph.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Emit a progress line every this many roots.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

fn default_workers() -> usize {
    1
}

fn default_progress_every() -> usize {
    DEFAULT_PROGRESS_EVERY
}

impl Default for ReduceSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            progress_every: default_progress_every(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Placed between the output path and the worker index when more than
    /// one worker writes artifacts.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// File-name prefix `merge` looks for.
    #[serde(default = "default_merge_prefix")]
    pub merge_prefix: String,
}

fn default_separator() -> String {
    "_".to_string()
}

fn default_merge_prefix() -> String {
    DEFAULT_MERGE_PREFIX.to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            merge_prefix: default_merge_prefix(),
        }
    }
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`Default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    reduce: ReduceSection,
    output: OutputSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(reduce: ReduceSection, output: OutputSection) -> Self {
        Self { reduce, output }
    }

    pub fn workers(&self) -> usize {
        self.reduce.workers
    }

    pub fn progress_every(&self) -> usize {
        self.reduce.progress_every
    }

    pub fn separator(&self) -> &str {
        &self.output.separator
    }

    pub fn merge_prefix(&self) -> &str {
        &self.output.merge_prefix
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(ReduceSection::default(), OutputSection::default())
    }
}
