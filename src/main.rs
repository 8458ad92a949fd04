//! Main entry point for the xiff CLI application.
//!
//! Each source is acquired into memory, then decoded with its own cursor
//! and decoder.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::Path;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;

use xiff::io::load;
use xiff::{
    ByteCursor, Cli, DecodeOptions, ExifDecoder, ExifFindings, HttpReader, LocalFileReader,
    MemoryReader,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let options = DecodeOptions { strict: cli.strict };
    let show_source = cli.sources.len() > 1;
    let mut failures = 0usize;

    for source in &cli.sources {
        match process_source(source, &cli, options).await {
            Ok(findings) => {
                if cli.quiet {
                    continue;
                }
                if show_source {
                    println!("--- {} ---", source);
                }
                print_findings(&findings);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{}: error: {:#}", source, e);
            }
        }
    }

    if failures > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Fetch the bytes of one source, honouring `--head`.
async fn acquire(source: &str, head: Option<u64>) -> Result<Vec<u8>> {
    if Cli::is_stdin(source) {
        let mut data = Vec::new();
        tokio::io::stdin().read_to_end(&mut data).await?;
        load(&MemoryReader::new(data), head).await
    } else if Cli::is_http_url(source) {
        let reader = HttpReader::new(source.to_string()).await?;
        load(&reader, head).await
    } else {
        let reader = LocalFileReader::new(Path::new(source))?;
        load(&reader, head).await
    }
}

async fn process_source(source: &str, cli: &Cli, options: DecodeOptions) -> Result<ExifFindings> {
    let bytes = acquire(source, cli.head).await?;
    info!("{}: acquired {} bytes", source, bytes.len());

    let mut decoder = ExifDecoder::with_options(ByteCursor::new(bytes), options);
    Ok(decoder.decode()?)
}

fn print_findings(findings: &ExifFindings) {
    let kind = if findings.is_jpeg() { "JPEG" } else { "not a JPEG" };
    println!("{:<12} 0x{:04X} ({})", "magic:", findings.magic, kind);
    println!(
        "{:<12} offset {}, segment length {}",
        "APP1:", findings.exif_marker_offset, findings.segment_length
    );
    println!(
        "{:<12} {}",
        "Exif header:",
        if findings.exif_header_valid { "valid" } else { "invalid" }
    );
    match findings.detected_byte_order {
        Some(order) => println!("{:<12} {}", "byte order:", order),
        None => println!("{:<12} {} (token not recognised)", "byte order:", findings.byte_order),
    }
    println!("{:<12} offset {}", "IFD marker:", findings.ifd_marker_offset);
    println!(
        "{:<12} offset/length {}, {} entries",
        "directory:", findings.directory.offset_or_length, findings.directory.entry_count
    );
    for warning in &findings.warnings {
        println!("{:<12} {}", "warning:", warning);
    }
}
