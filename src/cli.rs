// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `dagreduce`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dagreduce",
    version,
    about = "Compute the transitive reduction of a DAG given as an edge list.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Dagreduce.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DAGREDUCE_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Edge list to reduce when no subcommand is given.
    #[arg(value_name = "INPUT", requires = "output")]
    pub input: Option<PathBuf>,

    /// Output path for the bare `INPUT OUTPUT` form.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Number of workers for the bare `INPUT OUTPUT` form.
    #[arg(long, short = 'w', value_name = "N")]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl CliArgs {
    /// The command to run. `dagreduce INPUT OUTPUT [-w N]` is shorthand for
    /// `dagreduce reduce INPUT OUTPUT [-w N]`.
    pub fn resolve_command(&self) -> anyhow::Result<Command> {
        match (&self.command, &self.input, &self.output) {
            (Some(_), Some(_), _) => {
                anyhow::bail!("INPUT/OUTPUT cannot be combined with a subcommand")
            }
            (Some(command), None, _) => Ok(command.clone()),
            (None, Some(input), Some(output)) => Ok(Command::Reduce {
                input: input.clone(),
                output: output.clone(),
                workers: self.workers,
            }),
            (None, _, _) => anyhow::bail!("nothing to do: give INPUT OUTPUT or a subcommand"),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Reduce INPUT and write one DOT artifact per worker.
    ///
    /// INPUT holds the vertex count on the first line, then one `src dst`
    /// pair per line. With more than one worker, worker `i` writes
    /// `OUTPUT<separator>i`.
    Reduce {
        input: PathBuf,
        output: PathBuf,

        /// Number of workers (overrides `[reduce].workers`).
        #[arg(long, short = 'w', value_name = "N")]
        workers: Option<usize>,
    },

    /// Merge per-worker artifacts from DIR into a single DOT file.
    Merge {
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,

        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// File-name prefix of the artifacts (overrides `[output].merge_prefix`).
        #[arg(long, value_name = "PREFIX")]
        prefix: Option<String>,
    },

    /// Rewrite the edges of a DOT file as `label-->label` lines.
    Relabel {
        dot: PathBuf,
        /// One label per line; line `i` names vertex `i`.
        labels: PathBuf,
        out: PathBuf,
    },

    /// Reduce INPUT and compare the result with a brute-force reference.
    Check {
        input: PathBuf,

        #[arg(long, short = 'w', value_name = "N")]
        workers: Option<usize>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
