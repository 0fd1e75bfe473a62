use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ap_core::config::{ConvertConfig, OutputFormat, load_config};
use clap::Parser;
use log::LevelFilter;

/// ascii2piet — convertit un programme Piet encodé en ASCII en image PNG.
#[derive(Parser, Debug)]
#[command(name = "ascii2piet", version, about, long_about = None)]
pub struct Cli {
    /// Fichier source ASCII-Piet (défaut : stdin).
    pub infile: Option<PathBuf>,

    /// Fichier PNG de destination (défaut : stdout).
    pub outfile: Option<PathBuf>,

    /// Output an image with the given codel size.
    #[arg(
        short = 's',
        long = "size",
        value_name = "CODEL_SIZE",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub size: Option<u32>,

    /// Output as xxd hexdump instead of raw bytes.
    #[arg(short = 'x', long, default_value_t = false)]
    pub xxd: bool,

    /// Output extra information about the Piet program to stderr.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Fichier de configuration TOML (section [render]).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Convertir tous les fichiers .txt de ce dossier.
    #[arg(long, value_name = "DIR")]
    pub batch: Option<PathBuf>,

    /// Dossier de sortie du mode batch (défaut : le dossier source).
    #[arg(long, value_name = "DIR", requires = "batch")]
    pub batch_out: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Load `--config` if given, then apply the command-line overrides.
    ///
    /// A config file that does not exist falls back to the defaults; see
    /// [`Cli::missing_config`] for the warning.
    ///
    /// # Errors
    /// Returns an error if an existing config file cannot be read or parsed,
    /// or if the merged configuration is invalid.
    pub fn resolve_config(&self) -> Result<ConvertConfig> {
        let mut config = match self.config {
            Some(ref path) if path.exists() => load_config(path)?,
            _ => ConvertConfig::default(),
        };
        if let Some(size) = self.size {
            config.codel_size = size;
        }
        if self.xxd {
            config.output = OutputFormat::Hex;
        }
        if self.verbose {
            config.verbose = true;
        }
        config.validate().context("Configuration rejetée")?;
        Ok(config)
    }

    /// `--config` path when it names a file that does not exist.
    #[must_use]
    pub fn missing_config(&self) -> Option<&Path> {
        self.config.as_deref().filter(|p| !p.exists())
    }

    /// Log level for `env_logger`; verbose mode raises it to at least `info`.
    #[must_use]
    pub fn log_filter(&self, verbose: bool) -> LevelFilter {
        let level = self.log_level.parse().unwrap_or(LevelFilter::Warn);
        if verbose {
            level.max(LevelFilter::Info)
        } else {
            level
        }
    }
}
