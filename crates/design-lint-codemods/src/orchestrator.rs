//! Batch runner: every transform over one collected file set.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::collector::FileCollector;
use crate::error::CodemodError;
use crate::transforms::{all_codemods, codemod_by_name, transform_file, CodemodBox, CodemodResult};

/// Flags of one codemod run.
#[derive(Debug, Clone, Default)]
pub struct CodemodOptions {
    /// Report without writing.
    pub dry: bool,
    /// Also print skipped files.
    pub verbose: bool,
    /// Include globs added to the defaults.
    pub include: Vec<String>,
    /// Exclude globs added to the defaults.
    pub exclude: Vec<String>,
    /// Run a single transform by name instead of all of them.
    pub only: Option<String>,
}

/// One transform's result for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    /// Transform name.
    pub codemod: &'static str,
    /// What happened to the file.
    pub result: CodemodResult,
}

/// Everything a run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Outcomes in execution order.
    pub outcomes: Vec<TransformOutcome>,
    /// Whether the run was a dry run.
    pub dry: bool,
}

impl RunSummary {
    /// Number of distinct files at least one transform changed.
    #[must_use]
    pub fn changed_files(&self) -> usize {
        let mut per_file: BTreeMap<&str, bool> = BTreeMap::new();
        for outcome in &self.outcomes {
            *per_file.entry(outcome.result.file.as_str()).or_default() |= outcome.result.applied;
        }
        per_file.values().filter(|applied| **applied).count()
    }

    /// The closing count line.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let n = self.changed_files();
        if self.dry {
            format!("{n} files would be updated.")
        } else {
            format!("{n} files updated.")
        }
    }
}

/// Runs transforms in a fixed order, committing each one's output before
/// the next reads the file.
pub struct Orchestrator {
    root: PathBuf,
    codemods: Vec<CodemodBox>,
    collector: FileCollector,
    options: CodemodOptions,
}

impl Orchestrator {
    /// Prepares a run rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid glob or an unknown `--only` name.
    pub fn new(root: impl Into<PathBuf>, options: CodemodOptions) -> Result<Self, CodemodError> {
        let codemods = match &options.only {
            Some(name) => vec![
                codemod_by_name(name).ok_or_else(|| CodemodError::UnknownCodemod(name.clone()))?
            ],
            None => all_codemods(),
        };
        let collector = FileCollector::new(options.include.as_slice(), options.exclude.as_slice())?;
        Ok(Self {
            root: root.into(),
            codemods,
            collector,
            options,
        })
    }

    /// Project root the run operates in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the transforms this run executes, in order.
    #[must_use]
    pub fn codemod_names(&self) -> Vec<&'static str> {
        self.codemods.iter().map(|c| c.name()).collect()
    }

    /// Collects targets once and runs every transform over them, printing
    /// one line per reported file and a final count to `out`.
    ///
    /// # Errors
    ///
    /// Stops at the first transform that cannot parse or write a file; the
    /// error names that transform.
    pub fn run(&self, out: &mut dyn Write) -> Result<RunSummary, CodemodError> {
        let files = self.collector.collect(&self.root)?;
        tracing::info!(
            "Running {} codemod(s) over {} file(s){}",
            self.codemods.len(),
            files.len(),
            if self.options.dry { " (dry run)" } else { "" }
        );

        let mut summary = RunSummary {
            outcomes: Vec::with_capacity(files.len() * self.codemods.len()),
            dry: self.options.dry,
        };

        for codemod in &self.codemods {
            let name = codemod.name();
            for file in &files {
                let result = transform_file(codemod.as_ref(), &self.root, file, self.options.dry)
                    .map_err(|source| CodemodError::Transform {
                        name,
                        source: Box::new(source),
                    })?;
                if result.applied || self.options.verbose {
                    writeln!(out, "{}", self.report_line(name, &result))
                        .map_err(CodemodError::Report)?;
                }
                summary.outcomes.push(TransformOutcome {
                    codemod: name,
                    result,
                });
            }
        }

        writeln!(out, "\n{}", summary.summary_line()).map_err(CodemodError::Report)?;
        Ok(summary)
    }

    fn report_line(&self, name: &str, result: &CodemodResult) -> String {
        let status = match (result.applied, self.options.dry) {
            (true, true) => "would update",
            (true, false) => "updated",
            (false, _) => "skipped",
        };
        match &result.message {
            Some(message) => format!("[{name}] {status} {} ({message})", result.file),
            None => format!("[{name}] {status} {}", result.file),
        }
    }
}
