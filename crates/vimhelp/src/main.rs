//! vimhelp CLI - converts markdown documents to Vim help files.

mod error;
mod output;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vimhelp_renderer::{DEFAULT_COLUMNS, DEFAULT_TAB_WIDTH, VimHelpRenderer};

use error::CliError;
use output::Output;

/// Convert a markdown document to a Vim help file.
#[derive(Parser)]
#[command(name = "vimhelp", version, about)]
struct Cli {
    /// Markdown input file, or `-` to read standard input.
    input: PathBuf,

    /// Help file to write; its basename becomes the tag title.
    output: PathBuf,

    /// Layout width in columns.
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    cols: usize,

    /// Tab width in spaces.
    #[arg(long, default_value_t = DEFAULT_TAB_WIDTH)]
    tabs: usize,

    /// Do not generate a table of contents.
    #[arg(long)]
    no_toc: bool,

    /// Do not draw rules above top-level sections.
    #[arg(long)]
    no_rules: bool,

    /// Use PascalCase tags instead of lowercase underscore-separated tags.
    #[arg(long)]
    pascal: bool,

    /// Short description shown on the title line.
    #[arg(long, value_name = "TEXT")]
    desc: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(&cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, output: &Output) -> Result<(), CliError> {
    let markdown = read_input(&cli.input)?;

    let output_name = cli.output.to_string_lossy();
    let mut renderer = VimHelpRenderer::new(&output_name)
        .with_columns(cli.cols)
        .with_tab_width(cli.tabs)
        .with_toc(!cli.no_toc)
        .with_rules(!cli.no_rules)
        .with_pascal_tags(cli.pascal);
    if let Some(desc) = &cli.desc {
        renderer = renderer.with_description(desc.clone());
    }

    let result = renderer.render(&markdown)?;
    for warning in &result.warnings {
        output.warning(&warning.to_string());
    }

    fs::write(&cli.output, result.text).map_err(|source| CliError::Write {
        path: cli.output.clone(),
        source,
    })
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut markdown = String::new();
        std::io::stdin()
            .read_to_string(&mut markdown)
            .map_err(CliError::Stdin)?;
        Ok(markdown)
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_renderer() {
        let cli = Cli::parse_from(["vimhelp", "in.md", "out.txt"]);
        assert_eq!(cli.cols, DEFAULT_COLUMNS);
        assert_eq!(cli.tabs, DEFAULT_TAB_WIDTH);
        assert!(!cli.no_toc);
        assert!(!cli.no_rules);
        assert!(!cli.pascal);
        assert_eq!(cli.desc, None);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "vimhelp", "--cols", "100", "--tabs", "2", "--no-toc", "--no-rules", "--pascal",
            "--desc", "a demo", "-", "out.txt",
        ]);
        assert_eq!(cli.input.as_os_str(), "-");
        assert_eq!(cli.cols, 100);
        assert_eq!(cli.tabs, 2);
        assert!(cli.no_toc);
        assert!(cli.no_rules);
        assert!(cli.pascal);
        assert_eq!(cli.desc.as_deref(), Some("a demo"));
    }
}
