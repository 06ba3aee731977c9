//! Batch conversion of description files into scripts.

use std::path::{Path, PathBuf};

use crate::compile::{create_script, CompileOptions};
use crate::description::Description;
use crate::error::{Error, Result};
use crate::runner::ScriptRunner;

/// Settings of a [`create_scripts`] call.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Options passed to the compiler for every file.
    pub compile: CompileOptions,
    /// Treat the input as a glob pattern rather than a literal path.
    pub expand_glob: bool,
    /// Also write a spreadsheet next to each `plot` description.
    pub xlsx: bool,
    /// Runner executing each written script, if any.
    pub runner: Option<ScriptRunner>,
    /// Wait for each executed script to finish.
    pub blocking: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            compile: CompileOptions::default(),
            expand_glob: true,
            xlsx: false,
            runner: None,
            blocking: true,
        }
    }
}

/// Files produced from one description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    /// Written script.
    pub script: PathBuf,
    /// Written spreadsheet.
    pub spreadsheet: Option<PathBuf>,
    /// Whether the script was executed.
    pub executed: bool,
}

/// Outcome of processing one input file.
#[derive(Debug)]
pub struct FileReport {
    /// Description file.
    pub input: PathBuf,
    /// What was produced, or why the file failed.
    pub result: Result<Outputs>,
}

impl FileReport {
    /// Returns true if the file was processed without error.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Files named by `pattern`.
pub fn expand(pattern: &str, expand_glob: bool) -> Result<Vec<PathBuf>> {
    if !expand_glob {
        return Ok(vec![PathBuf::from(pattern)]);
    }
    let entries = glob::glob(pattern).map_err(|e| Error::Pattern(format!("{pattern}: {e}")))?;
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => log::warn!("skipping {}: {}", e.path().display(), e.error()),
        }
    }
    if files.is_empty() {
        return Err(Error::NoMatch(pattern.to_string()));
    }
    Ok(files)
}

/// Writes a script next to every description file named by `pattern`.
///
/// Each script is named after its input (`figure.vfd` → `figure.py`) and
/// saves or shows the figure under the input's stem. A file that fails is
/// recorded in its report without stopping the batch. When a runner is
/// given it is probed once up front and a failed probe aborts the batch.
pub fn create_scripts(pattern: &str, options: &BatchOptions) -> Result<Vec<FileReport>> {
    let files = expand(pattern, options.expand_glob)?;
    if let Some(runner) = &options.runner {
        runner.probe()?;
    }
    Ok(files
        .into_iter()
        .map(|input| {
            let result = create_script_file(&input, options);
            if let Err(e) = &result {
                log::error!("{}: {e}", input.display());
            }
            FileReport { input, result }
        })
        .collect())
}

/// Compiles one description file, writing `<stem>.py` next to it.
///
/// The runner in `options`, if any, is used without probing it.
pub fn create_script_file(input: &Path, options: &BatchOptions) -> Result<Outputs> {
    let description = Description::from_path(input)?;
    let export_name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::io(
                input,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"),
            )
        })?;

    let script_text = create_script(&description, &export_name, &options.compile)?;
    let script = input.with_extension("py");
    std::fs::write(&script, script_text).map_err(|e| Error::io(&script, e))?;
    log::info!("wrote {}", script.display());

    let spreadsheet = if options.xlsx {
        let path = input.with_extension("xlsx");
        match crate::export::export_xlsx(&description, &path) {
            Ok(()) => Some(path),
            Err(Error::NotImplemented(what)) => {
                log::warn!("{}: {what}", input.display());
                None
            }
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let executed = match &options.runner {
        Some(runner) => {
            runner.run(&script, options.blocking)?;
            true
        }
        None => false,
    };

    Ok(Outputs {
        script,
        spreadsheet,
        executed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLOT: &str = r#"{"type": "plot", "series": [{"y": [1, 2, 3]}]}"#;

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_script_written_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "growth.vfd", PLOT);
        let options = BatchOptions {
            expand_glob: false,
            compile: CompileOptions::default().formats(["pdf"]),
            ..BatchOptions::default()
        };

        let reports = create_scripts(input.to_str().unwrap(), &options).unwrap();
        assert_eq!(reports.len(), 1);
        let outputs = reports[0].result.as_ref().unwrap();
        assert_eq!(outputs.script, dir.path().join("growth.py"));
        assert!(!outputs.executed);
        let script = std::fs::read_to_string(&outputs.script).unwrap();
        assert!(script.ends_with("plt.savefig(\"growth.pdf\")\n"));
    }

    #[test]
    fn test_glob_expansion_is_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.vfd", PLOT);
        write(dir.path(), "b.vfd", r#"{"type": "surface"}"#);
        write(dir.path(), "c.vfd", "{ not json");
        let pattern = format!("{}/*.vfd", dir.path().display());

        let reports = create_scripts(&pattern, &BatchOptions::default()).unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(dir.path().join("a.py").exists());
        assert!(!dir.path().join("b.py").exists());
        assert!(matches!(
            reports
                .iter()
                .find(|r| r.input.ends_with("b.vfd"))
                .map(|r| &r.result),
            Some(Err(Error::UnknownVariant(_)))
        ));
    }

    #[test]
    fn test_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.vfd", dir.path().display());
        assert!(matches!(
            create_scripts(&pattern, &BatchOptions::default()),
            Err(Error::NoMatch(_))
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(expand("[", true), Err(Error::Pattern(_))));
    }

    #[test]
    fn test_literal_path_keeps_brackets() {
        let files = expand("figure[1].vfd", false).unwrap();
        assert_eq!(files, vec![PathBuf::from("figure[1].vfd")]);
    }

    #[test]
    fn test_missing_literal_file_is_reported() {
        let options = BatchOptions {
            expand_glob: false,
            ..BatchOptions::default()
        };
        let reports = create_scripts("/nonexistent/figure.vfd", &options).unwrap();
        assert!(matches!(reports[0].result, Err(Error::Io { .. })));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_spreadsheet_only_for_plots() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "line.vfd", PLOT);
        write(dir.path(), "field.vfd", r#"{"type": "colorplot", "z": [[1, 2], [3, 4]]}"#);
        let options = BatchOptions {
            xlsx: true,
            ..BatchOptions::default()
        };
        let pattern = format!("{}/*.vfd", dir.path().display());

        let reports = create_scripts(&pattern, &options).unwrap();
        assert!(reports.iter().all(FileReport::is_ok));
        assert!(dir.path().join("line.xlsx").exists());
        assert!(!dir.path().join("field.xlsx").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_probe_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "a.vfd", PLOT);
        let options = BatchOptions {
            runner: Some(ScriptRunner::new("false")),
            ..BatchOptions::default()
        };
        let err = create_scripts(input.to_str().unwrap(), &options).unwrap_err();
        assert!(matches!(err, Error::ExternalToolMissing { .. }));
        assert!(!dir.path().join("a.py").exists());
    }
}
