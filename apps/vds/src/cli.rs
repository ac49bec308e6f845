//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;
use vds_types::OutputFormat;

/// vds - build vulnerability findings for one scan subject
#[derive(Parser)]
#[command(name = "vds")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve matched vulnerability candidates into report entries")]
#[command(long_about = None)]
pub struct Cli {
    /// Scan context document (JSON), or "-" for stdin
    #[arg(value_name = "CONTEXT")]
    pub context: PathBuf,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments
#[derive(Parser)]
pub struct GlobalArgs {
    /// Emit logs as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Result output format
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Feed database to resolve candidates against
    #[arg(long, value_name = "PATH")]
    pub feed: Option<PathBuf>,

    /// Bypass the in-process lookup cache
    #[arg(long)]
    pub no_cache: bool,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "vds",
            "--output",
            "plain",
            "--feed",
            "/var/lib/vds/feed.db",
            "--no-cache",
            "ctx.json",
        ])
        .unwrap();

        assert_eq!(cli.context, PathBuf::from("ctx.json"));
        assert_eq!(cli.global.output, Some(OutputFormat::Plain));
        assert_eq!(cli.global.feed, Some(PathBuf::from("/var/lib/vds/feed.db")));
        assert!(cli.global.no_cache);
        assert!(!cli.global.json);
    }

    #[test]
    fn context_is_required() {
        assert!(Cli::try_parse_from(["vds"]).is_err());
    }
}
