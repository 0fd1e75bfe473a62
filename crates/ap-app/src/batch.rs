use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ap_core::config::{ConvertConfig, OutputFormat};
use rayon::prelude::*;

use crate::pipeline::{self, Payload};

/// Extension des programmes ASCII-Piet reconnus.
const SOURCE_EXT: &str = "txt";

/// Bilan d'un traitement par lots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files converted successfully.
    pub converted: usize,
    /// Files that failed; each failure is logged.
    pub failed: usize,
}

/// Convertit tous les programmes `.txt` de `folder` (non récursif).
///
/// Each `name.txt` becomes `name.png` (or `name.hex` in hex mode) in
/// `out_dir`, defaulting to `folder`. Files are independent and converted in
/// parallel; one failure does not stop the others.
///
/// # Errors
/// Returns an error if the config is invalid, the folder cannot be read,
/// holds no `.txt` file, or the output folder cannot be created.
pub fn run_batch(
    folder: &Path,
    out_dir: Option<&Path>,
    config: &ConvertConfig,
) -> Result<BatchReport> {
    config.validate()?;
    let files = scan_sources(folder)?;
    if files.is_empty() {
        anyhow::bail!("Aucun fichier .{SOURCE_EXT} trouvé dans {}", folder.display());
    }
    let out_dir = out_dir.unwrap_or(folder);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Impossible de créer {}", out_dir.display()))?;

    log::info!(
        "Conversion par lots : {} fichier(s) de {} vers {}",
        files.len(),
        folder.display(),
        out_dir.display()
    );

    let failed = files
        .par_iter()
        .map(|src| {
            let dst = output_path(src, out_dir, config.output);
            convert_file(src, &dst, config)
                .map_err(|e| log::warn!("{} : {e:#}", src.display()))
                .is_err()
        })
        .filter(|&failed| failed)
        .count();

    let report = BatchReport {
        converted: files.len() - failed,
        failed,
    };
    log::info!(
        "Lot terminé : {} converti(s), {} échec(s)",
        report.converted,
        report.failed
    );
    Ok(report)
}

/// Liste triée des fichiers `.txt` d'un dossier.
fn scan_sources(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(folder)
        .with_context(|| format!("Impossible de lire le dossier {}", folder.display()))?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXT))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn output_path(src: &Path, out_dir: &Path, output: OutputFormat) -> PathBuf {
    let ext = match output {
        OutputFormat::Png => "png",
        OutputFormat::Hex => "hex",
    };
    let mut name = src.file_stem().unwrap_or(src.as_os_str()).to_os_string();
    name.push(".");
    name.push(ext);
    out_dir.join(name)
}

fn convert_file(src: &Path, dst: &Path, config: &ConvertConfig) -> Result<()> {
    let source = pipeline::read_source(Some(src))?;
    let conversion = pipeline::convert(&source, config)?;
    log::debug!(
        "{} → {} ({}×{} codels)",
        src.display(),
        dst.display(),
        conversion.width,
        conversion.height
    );
    let written = match conversion.payload {
        Payload::Png(ref bytes) => fs::write(dst, bytes),
        Payload::Hex(ref dump) => fs::write(dst, dump),
    };
    written.with_context(|| format!("Could not write to {}", dst.display()))
}
