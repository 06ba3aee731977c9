//! vfd - compile figure description files into matplotlib scripts.
//!
//! Run: `vfd figures/*.vfd --format pdf,png`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use vfd::batch::{self, BatchOptions};
use vfd::runner::ScriptRunner;
use vfd::Config;

/// Compile vfd figure descriptions into matplotlib scripts
#[derive(Parser, Debug)]
#[command(name = "vfd")]
#[command(version)]
#[command(about = "Create matplotlib scripts from vfd figure descriptions", long_about = None)]
struct Cli {
    /// Description files or glob patterns (e.g. `*.vfd`)
    files: Vec<String>,

    /// Output formats to save (repeat or separate with commas); none shows the figure
    #[arg(short, long = "format", value_delimiter = ',')]
    formats: Vec<String>,

    /// matplotlib style presets, separated by `/` (e.g. `ggplot/seaborn-poster`)
    #[arg(short, long)]
    style: Option<String>,

    /// Fit the layout to the figure
    #[arg(long)]
    tight_layout: bool,

    /// Enlarge multiplot figures with the grid size
    #[arg(long)]
    scale_multiplot: bool,

    /// Also write a spreadsheet for each plot description
    #[arg(long)]
    xlsx: bool,

    /// Only write the scripts, do not run them
    #[arg(long)]
    no_run: bool,

    /// Treat arguments as literal paths
    #[arg(long)]
    no_glob: bool,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug output (also `VFD_DEBUG=1`)
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Batch settings from the configuration, overridden by flags.
    fn batch_options(&self, config: &Config) -> BatchOptions {
        let mut compile = config.compile_options();
        if !self.formats.is_empty() {
            compile = compile.formats(self.formats.iter().filter(|f| !f.is_empty()).cloned());
        }
        if let Some(style) = &self.style {
            compile = compile.context(style.split('/').filter(|s| !s.is_empty()));
        }
        if self.tight_layout {
            compile = compile.tight_layout(true);
        }
        if self.scale_multiplot {
            compile = compile.scale_multiplot(true);
        }
        BatchOptions {
            compile,
            expand_glob: !self.no_glob,
            xlsx: self.xlsx,
            runner: None,
            blocking: config.runner.blocking,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    vfd::debug::init(cli.debug || vfd::debug::requested_by_env());

    if cli.files.is_empty() {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Processes every file, returning whether all of them succeeded.
fn run(cli: &Cli) -> Result<bool> {
    let config = Config::discover(cli.config.as_deref()).context("loading configuration")?;
    let mut options = cli.batch_options(&config);
    let execute = config.runner.run && !cli.no_run;
    let runner = ScriptRunner::new(config.runner.interpreter.clone())
        .probe_timeout(config.probe_timeout());

    let mut all_ok = true;
    for pattern in &cli.files {
        let files = match batch::expand(pattern, options.expand_glob) {
            Ok(files) => files,
            Err(e) => {
                log::error!("{e}");
                all_ok = false;
                continue;
            }
        };
        for input in files {
            if execute && options.runner.is_none() {
                runner.probe()?;
                options.runner = Some(runner.clone());
            }
            match batch::create_script_file(&input, &options) {
                Ok(outputs) => log::debug!("{}: {outputs:?}", input.display()),
                Err(e) => {
                    log::error!("{}: {e}", input.display());
                    all_ok = false;
                }
            }
        }
    }
    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "vfd",
            "a.vfd",
            "--format",
            "pdf,png",
            "-f",
            "svg",
            "--style",
            "ggplot/dark_background",
            "--no-glob",
        ]);
        let mut config = Config::new();
        config.output.formats = vec!["eps".into()];
        config.output.tight_layout = true;

        let options = cli.batch_options(&config);
        assert_eq!(options.compile.export_formats, vec!["pdf", "png", "svg"]);
        assert_eq!(
            options.compile.style_context,
            vec!["ggplot", "dark_background"]
        );
        assert!(options.compile.tight_layout);
        assert!(!options.expand_glob);
    }

    #[test]
    fn test_config_used_without_flags() {
        let cli = Cli::parse_from(["vfd", "a.vfd"]);
        let mut config = Config::new();
        config.output.formats = vec!["eps".into()];
        config.runner.blocking = false;

        let options = cli.batch_options(&config);
        assert_eq!(options.compile.export_formats, vec!["eps"]);
        assert!(!options.blocking);
        assert!(options.expand_glob);
    }
}
