use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ap_core::bits::{literal_to_packed, packed_to_literal};
use ap_core::config::{ConvertConfig, OutputFormat};
use ap_core::grid::build_grid;
use ap_export::{encode_png, hexdump, magnify};

/// Résultat encodé d'une conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Raw PNG bytes.
    Png(Vec<u8>),
    /// Hex dump of the PNG bytes.
    Hex(String),
}

/// One finished conversion.
#[derive(Clone, Debug)]
pub struct Conversion {
    /// Program width in codels.
    pub width: u32,
    /// Program height in codels.
    pub height: u32,
    /// Encoded output.
    pub payload: Payload,
}

/// Convertit un programme ASCII-Piet (packed, literal ou mixte) en PNG.
///
/// Diagnostics go through `log` at `info` level and never change the result.
///
/// # Errors
/// Returns an error if the configuration is invalid (checked before any
/// codec work), if the program has no lines, or if PNG encoding fails.
///
/// # Example
/// ```
/// use ap_app::pipeline::{convert, Payload};
/// use ap_core::config::ConvertConfig;
/// let out = convert(b"ijk\nlm", &ConvertConfig::default()).unwrap();
/// assert_eq!((out.width, out.height), (3, 2));
/// assert!(matches!(out.payload, Payload::Png(_)));
/// ```
pub fn convert(source: &[u8], config: &ConvertConfig) -> Result<Conversion> {
    config.validate()?;

    // Literal line breaks are folded into EOL bits, then expanded again.
    let packed = literal_to_packed(source);
    log::info!(
        "ASCII-encoded Piet is {} bytes:\n{}\n",
        packed.len(),
        String::from_utf8_lossy(&packed)
    );
    let literal = packed_to_literal(&packed);
    log::info!("With newlines added:\n{}\n", String::from_utf8_lossy(&literal));

    let grid = build_grid(&literal)?;
    log::info!(
        "Program size is {} by {} ({} codels)",
        grid.width,
        grid.height,
        grid.codel_count()
    );

    log::info!("Generating image with codel size {}", config.codel_size);
    let img = magnify(&grid, config.codel_size)?;
    let png = encode_png(&img)?;

    let payload = match config.output {
        OutputFormat::Png => {
            log::info!("Outputting PNG file as raw bytes");
            Payload::Png(png)
        }
        OutputFormat::Hex => {
            log::info!("Outputting PNG file as hexdump");
            Payload::Hex(hexdump(&png))
        }
    };
    Ok(Conversion {
        width: grid.width,
        height: grid.height,
        payload,
    })
}

/// Lit la source depuis un fichier, ou stdin si `path` est `None`.
///
/// # Errors
/// Returns an error if the source cannot be read.
pub fn read_source(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) => std::fs::read(p).with_context(|| format!("Could not read from {}", p.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("Could not read from <stdin>")?;
            Ok(buf)
        }
    }
}

/// Écrit le résultat dans un fichier, ou sur stdout si `path` est `None`.
///
/// A hex dump printed on stdout gets a trailing newline; written to a file it
/// is stored verbatim.
///
/// # Errors
/// Returns an error if the destination cannot be written.
pub fn write_output(path: Option<&Path>, payload: &Payload) -> Result<()> {
    let written = match path {
        Some(p) => {
            std::fs::File::create(p).and_then(|mut f| write_payload(&mut f, payload, false))
        }
        None => write_payload(&mut std::io::stdout().lock(), payload, true),
    };
    written.with_context(|| {
        let dest = path.map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
        format!("Could not write to {dest}")
    })
}

/// Write `payload` to `out`. `terminal` adds a newline after a hex dump.
///
/// # Errors
/// Propagates the sink's I/O errors.
pub fn write_payload<W: Write>(
    out: &mut W,
    payload: &Payload,
    terminal: bool,
) -> std::io::Result<()> {
    match payload {
        Payload::Png(bytes) => out.write_all(bytes)?,
        Payload::Hex(dump) if terminal => writeln!(out, "{dump}")?,
        Payload::Hex(dump) => out.write_all(dump.as_bytes())?,
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ap_core::error::CoreError;
    use ap_export::decode_png;

    fn config(codel_size: u32, output: OutputFormat) -> ConvertConfig {
        ConvertConfig {
            codel_size,
            output,
            verbose: false,
        }
    }

    #[test]
    fn png_matches_program_geometry() {
        let out = convert(b"abc\nde\n", &config(5, OutputFormat::Png)).unwrap();
        let Payload::Png(bytes) = out.payload else {
            panic!("expected PNG payload");
        };
        let img = decode_png(&bytes).unwrap();
        assert_eq!((img.width, img.height), (15, 10));
        // padded cell (2, 1) is black
        assert_eq!(img.pixel(12, 7), (0, 0, 0));
    }

    #[test]
    fn hex_mode_dumps_the_png() {
        let png = convert(b"ijk", &config(2, OutputFormat::Png)).unwrap();
        let hex = convert(b"ijk", &config(2, OutputFormat::Hex)).unwrap();
        let (Payload::Png(bytes), Payload::Hex(dump)) = (png.payload, hex.payload) else {
            panic!("unexpected payload kinds");
        };
        assert_eq!(dump, hexdump(&bytes));
    }

    #[test]
    fn empty_program_fails() {
        let err = convert(b"", &ConvertConfig::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::EmptyProgram)
        );
        assert!(convert(b"\n\n\n", &ConvertConfig::default()).is_err());
    }

    #[test]
    fn invalid_codel_size_fails_before_codec() {
        // Empty input would fail too; the config check must come first.
        let err = convert(b"", &config(0, OutputFormat::Png)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::InvalidCodelSize { size: 0 })
        );
    }

    #[test]
    fn verbose_does_not_change_output() {
        let quiet = convert(b"ijk\nlm", &config(3, OutputFormat::Hex)).unwrap();
        let mut loud_config = config(3, OutputFormat::Hex);
        loud_config.verbose = true;
        let loud = convert(b"ijk\nlm", &loud_config).unwrap();
        assert_eq!(quiet.payload, loud.payload);
    }

    #[test]
    fn write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.hex");
        write_output(Some(&path), &Payload::Hex("00000000: 41  A".into())).unwrap();
        assert_eq!(read_source(Some(&path)).unwrap(), b"00000000: 41  A");
    }

    #[test]
    fn hex_dump_gets_newline_only_on_terminal() {
        let payload = Payload::Hex("00000000: 41  A".into());
        let mut terminal = Vec::new();
        write_payload(&mut terminal, &payload, true).unwrap();
        assert_eq!(terminal, b"00000000: 41  A\n");
        let mut file = Vec::new();
        write_payload(&mut file, &payload, false).unwrap();
        assert_eq!(file, b"00000000: 41  A");
    }

    #[test]
    fn png_bytes_written_verbatim() {
        let payload = Payload::Png(vec![0x89, b'P', b'N', b'G']);
        for terminal in [true, false] {
            let mut sink = Vec::new();
            write_payload(&mut sink, &payload, terminal).unwrap();
            assert_eq!(sink, [0x89, b'P', b'N', b'G']);
        }
    }

    #[test]
    fn unreadable_source_reports_path() {
        let err = read_source(Some(Path::new("/nonexistent/prog.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/prog.txt"));
    }
}
