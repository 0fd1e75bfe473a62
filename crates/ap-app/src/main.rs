use anyhow::Result;
use ap_app::{batch, cli, pipeline};
use clap::Parser;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Charger la config (fichier + overrides CLI), validée avant toute conversion
    let config = cli.resolve_config()?;

    // 3. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_filter(config.verbose))
        .init();
    if let Some(path) = cli.missing_config() {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
    }

    // Traitement par lots
    if let Some(folder) = cli.batch.as_deref() {
        let report = batch::run_batch(folder, cli.batch_out.as_deref(), &config)?;
        if report.failed > 0 {
            anyhow::bail!(
                "{} fichier(s) sur {} en échec",
                report.failed,
                report.failed + report.converted
            );
        }
        return Ok(());
    }

    log::info!("Converting from ASCII-encoded Piet to PNG");
    log::info!(
        "Source file: {}",
        cli.infile
            .as_deref()
            .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
    );
    log::info!(
        "Destination file: {}",
        cli.outfile
            .as_deref()
            .map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string())
    );

    // 4. Lire, convertir, écrire
    let source = pipeline::read_source(cli.infile.as_deref())?;
    let conversion = pipeline::convert(&source, &config)?;
    pipeline::write_output(cli.outfile.as_deref(), &conversion.payload)
}
