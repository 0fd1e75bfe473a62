use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ap_core::config::{ConvertConfig, OutputFormat};
/// let config = ConvertConfig::default();
/// assert_eq!(config.codel_size, 1);
/// assert_eq!(config.output, OutputFormat::Png);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Côté en pixels d'un codel dans l'image produite. Toujours > 0.
    pub codel_size: u32,
    /// Format de sortie.
    pub output: OutputFormat,
    /// Diagnostics on stderr. Never changes the produced bytes.
    pub verbose: bool,
}

/// Output payload of a conversion.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw PNG bytes (default).
    #[default]
    Png,
    /// `xxd`-style hex dump of the PNG bytes.
    Hex,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            codel_size: 1,
            output: OutputFormat::Png,
            verbose: false,
        }
    }
}

impl ConvertConfig {
    /// Vérifie la configuration avant tout travail de conversion.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidCodelSize`] if `codel_size` is 0.
    ///
    /// # Example
    /// ```
    /// use ap_core::config::ConvertConfig;
    /// let config = ConvertConfig { codel_size: 0, ..Default::default() };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.codel_size == 0 {
            return Err(CoreError::InvalidCodelSize {
                size: self.codel_size,
            });
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    codel_size: Option<u32>,
    output: Option<OutputFormat>,
    verbose: Option<bool>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// ```toml
/// [render]
/// codel_size = 8
/// output = "Hex"
/// ```
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if the merged
/// configuration does not validate.
///
/// # Example
/// ```no_run
/// use ap_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("ascii2piet.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de config dans {}", path.display()))
}

/// Parse TOML text, merging the `[render]` section over the defaults.
///
/// # Errors
/// Returns an error on invalid TOML or an invalid merged configuration.
///
/// # Example
/// ```
/// use ap_core::config::parse_config;
/// let config = parse_config("[render]\ncodel_size = 4\n").unwrap();
/// assert_eq!(config.codel_size, 4);
/// assert!(!config.verbose);
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ConvertConfig::default();
    if let Some(r) = file.render {
        if let Some(v) = r.codel_size {
            config.codel_size = v;
        }
        if let Some(v) = r.output {
            config.output = v;
        }
        if let Some(v) = r.verbose {
            config.verbose = v;
        }
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), ConvertConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config("[render]\noutput = \"Hex\"\n").unwrap();
        assert_eq!(config.output, OutputFormat::Hex);
        assert_eq!(config.codel_size, 1);
    }

    #[test]
    fn zero_codel_size_is_rejected() {
        let err = parse_config("[render]\ncodel_size = 0\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidCodelSize { size: 0 })
        ));
    }

    #[test]
    fn negative_codel_size_fails_to_parse() {
        assert!(parse_config("[render]\ncodel_size = -3\n").is_err());
        assert!(parse_config("[render]\ncodel_size = 1.5\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\ncodel_size = 12\nverbose = true").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.codel_size, 12);
        assert!(config.verbose);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/ascii2piet.toml")).is_err());
    }
}
