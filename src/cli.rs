use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "xiff")]
#[command(version)]
#[command(about = "Locate the EXIF directory header in JPEG images", long_about = None)]
#[command(after_help = "Examples:\n  \
  xiff photo.jpg                          report the EXIF header of photo.jpg\n  \
  xiff --strict a.jpg b.jpg               fail on any non-conformant header\n  \
  xiff --head 65536 https://example.com/p.jpg   fetch only the first 64 KiB\n  \
  cat photo.jpg | xiff -                  read the image from stdin")]
pub struct Cli {
    /// Image paths, HTTP(S) URLs, or - for stdin
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<String>,

    /// Treat soft mismatches (magic, Exif literal, byte order token) as errors
    #[arg(long)]
    pub strict: bool,

    /// Acquire at most this many bytes from each source
    #[arg(long, value_name = "BYTES")]
    pub head: Option<u64>,

    /// More log output (-vv => debug)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode: no report, errors only
    #[arg(short = 'q')]
    pub quiet: bool,
}

impl Cli {
    pub fn is_http_url(source: &str) -> bool {
        source.starts_with("http://") || source.starts_with("https://")
    }

    pub fn is_stdin(source: &str) -> bool {
        source == "-"
    }

    /// Log level implied by `-v`/`-q`. `RUST_LOG` still wins when set.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        let cli = Cli::parse_from(["xiff", "a.jpg"]);
        assert_eq!(cli.log_level(), LevelFilter::Warn);

        let cli = Cli::parse_from(["xiff", "-vv", "a.jpg", "b.jpg"]);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
        assert_eq!(cli.sources, vec!["a.jpg", "b.jpg"]);

        let cli = Cli::parse_from(["xiff", "-q", "-v", "a.jpg"]);
        assert_eq!(cli.log_level(), LevelFilter::Error);
    }

    #[test]
    fn source_kinds() {
        assert!(Cli::is_http_url("https://example.com/a.jpg"));
        assert!(!Cli::is_http_url("photos/http.jpg"));
        assert!(Cli::is_stdin("-"));
    }

    #[test]
    fn sources_are_required() {
        assert!(Cli::try_parse_from(["xiff"]).is_err());
        assert!(Cli::try_parse_from(["xiff", "--head", "many", "a.jpg"]).is_err());
    }
}
