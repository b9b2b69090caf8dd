//! Batch generation: validate a list of themes, render them, write them.
//!
//! [`generate`] works in two passes. The first pass checks the whole batch
//! (duplicate slugs, then each definition) without touching the filesystem.
//! The second renders and writes `<out_dir>/<slug>.html` for every theme that
//! passed. Each file is written to a temporary file in the same directory and
//! then persisted over the target, so a reader never sees a half-written
//! document and re-running simply replaces the previous output.
//!
//! What happens to a failing theme depends on the [`FailurePolicy`]:
//!
//! - [`FailurePolicy::Isolate`]: the theme is reported as
//!   [`ThemeOutcome::Failed`] and the others continue.
//! - [`FailurePolicy::FailFast`]: the first error is returned. Errors found in
//!   the first pass therefore stop the batch before anything is written.
//!
//! ```rust
//! use invoice_render::output::{generate, GenerateOptions};
//! use invoice_render::style::StyleRegistry;
//! use invoice_render::theme::{Materializer, ThemeDef};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let materializer = Materializer::new(StyleRegistry::builtin()).unwrap();
//! let themes = vec![
//!     ThemeDef::new("Print", "print"),
//!     ThemeDef::new("Broken", "no-such-style"),
//! ];
//!
//! let report = generate(&materializer, &themes, &GenerateOptions::new(dir.path())).unwrap();
//! assert_eq!(report.written().count(), 1);
//! assert_eq!(report.failed().count(), 1);
//! assert!(dir.path().join("print.html").exists());
//! ```

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::theme::{Materializer, ThemeDef};

/// Directory used when no output directory is given.
pub const DEFAULT_OUT_DIR: &str = "invoice_templates";

/// What to do when one theme in a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Report the failure and keep going.
    #[default]
    Isolate,
    /// Stop at the first failure.
    FailFast,
}

/// Settings for [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    pub policy: FailurePolicy,
    /// Render and validate, but write nothing.
    pub dry_run: bool,
}

impl GenerateOptions {
    /// Isolating options writing into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            policy: FailurePolicy::Isolate,
            dry_run: false,
        }
    }

    /// Sets the failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Where the document for `slug` goes.
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.out_dir.join(format!("{slug}.html"))
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::new(DEFAULT_OUT_DIR)
    }
}

/// Result for a single theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ThemeOutcome {
    Written {
        slug: String,
        path: PathBuf,
        bytes: usize,
    },
    /// Would have been written (dry run).
    Planned {
        slug: String,
        path: PathBuf,
        bytes: usize,
    },
    Failed {
        slug: String,
        message: String,
    },
}

impl ThemeOutcome {
    /// The slug this outcome belongs to.
    pub fn slug(&self) -> &str {
        match self {
            ThemeOutcome::Written { slug, .. }
            | ThemeOutcome::Planned { slug, .. }
            | ThemeOutcome::Failed { slug, .. } => slug,
        }
    }

    /// Whether the theme failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, ThemeOutcome::Failed { .. })
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub outcomes: Vec<ThemeOutcome>,
}

impl GenerationReport {
    /// Themes written to disk.
    pub fn written(&self) -> impl Iterator<Item = &ThemeOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ThemeOutcome::Written { .. }))
    }

    /// Themes a dry run would have written.
    pub fn planned(&self) -> impl Iterator<Item = &ThemeOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ThemeOutcome::Planned { .. }))
    }

    /// Themes that failed.
    pub fn failed(&self) -> impl Iterator<Item = &ThemeOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// True when no theme failed.
    pub fn is_success(&self) -> bool {
        !self.outcomes.iter().any(ThemeOutcome::is_failure)
    }

    /// Outcome for `slug`, if the batch contained it.
    pub fn get(&self, slug: &str) -> Option<&ThemeOutcome> {
        self.outcomes.iter().find(|o| o.slug() == slug)
    }
}

/// Validates, renders and writes a batch of themes.
///
/// # Errors
///
/// Under [`FailurePolicy::FailFast`], the first theme error, including a
/// failure to create the output directory. Under [`FailurePolicy::Isolate`]
/// that failure is reported as a `Failed` outcome for every theme that
/// passed validation.
pub fn generate(
    materializer: &Materializer,
    defs: &[ThemeDef],
    options: &GenerateOptions,
) -> Result<GenerationReport, ThemeError> {
    let checked = check_batch(materializer, defs);
    if options.policy == FailurePolicy::FailFast && checked.iter().any(|(_, r)| r.is_err()) {
        return Err(first_error(checked));
    }

    let mut slots: Vec<Option<ThemeOutcome>> = Vec::with_capacity(defs.len());
    for (slug, result) in &checked {
        match result {
            Ok(()) => slots.push(None),
            Err(err) => {
                tracing::warn!(slug = %slug, error = %err, "theme rejected");
                slots.push(Some(ThemeOutcome::Failed {
                    slug: slug.clone(),
                    message: err.to_string(),
                }));
            }
        }
    }

    let pending = slots.iter().any(Option::is_none);
    if pending && !options.dry_run {
        if let Err(e) = std::fs::create_dir_all(&options.out_dir) {
            let err = ThemeError::io(&options.out_dir, e);
            if options.policy == FailurePolicy::FailFast {
                return Err(err);
            }
            tracing::warn!(
                out_dir = %options.out_dir.display(),
                error = %err,
                "output directory unavailable"
            );
            let message = err.to_string();
            for ((slug, _), slot) in checked.iter().zip(slots.iter_mut()) {
                if slot.is_none() {
                    *slot = Some(ThemeOutcome::Failed {
                        slug: slug.clone(),
                        message: message.clone(),
                    });
                }
            }
        }
    }

    for ((def, (slug, _)), slot) in defs.iter().zip(&checked).zip(slots.iter_mut()) {
        if slot.is_some() {
            continue;
        }
        let path = options.path_for(slug);
        let outcome = match render_one(materializer, def, &path, options.dry_run) {
            Ok(outcome) => outcome,
            Err(err) if options.policy == FailurePolicy::FailFast => return Err(err),
            Err(err) => {
                tracing::warn!(slug = %slug, style = %def.style, error = %err, "theme failed");
                ThemeOutcome::Failed {
                    slug: slug.clone(),
                    message: err.to_string(),
                }
            }
        };
        *slot = Some(outcome);
    }

    Ok(GenerationReport {
        outcomes: slots.into_iter().flatten().collect(),
    })
}

/// First pass: slug uniqueness, then per-theme validation.
fn check_batch(
    materializer: &Materializer,
    defs: &[ThemeDef],
) -> Vec<(String, Result<(), ThemeError>)> {
    let slugs: Vec<String> = defs.iter().map(|def| def.slug().into_owned()).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for slug in &slugs {
        *counts.entry(slug.as_str()).or_default() += 1;
    }

    defs.iter()
        .zip(&slugs)
        .map(|(def, slug)| {
            let count = counts.get(slug.as_str()).copied().unwrap_or(0);
            let result = if count > 1 {
                Err(ThemeError::DuplicateSlug {
                    slug: slug.clone(),
                    count,
                })
            } else {
                materializer.validate(def).map(|_| ())
            };
            (slug.clone(), result)
        })
        .collect()
}

/// Picks the error fail-fast reports. Duplicates outrank other problems.
///
/// Only called with at least one error present.
fn first_error(checked: Vec<(String, Result<(), ThemeError>)>) -> ThemeError {
    let mut errors: Vec<ThemeError> = checked.into_iter().filter_map(|(_, r)| r.err()).collect();
    let index = errors
        .iter()
        .position(|e| matches!(e, ThemeError::DuplicateSlug { .. }))
        .unwrap_or(0);
    errors.swap_remove(index)
}

fn render_one(
    materializer: &Materializer,
    def: &ThemeDef,
    path: &Path,
    dry_run: bool,
) -> Result<ThemeOutcome, ThemeError> {
    let theme = materializer.materialize(def)?;
    let bytes = theme.html.len();
    if dry_run {
        tracing::debug!(slug = %theme.slug, path = %path.display(), "dry run, not writing");
        return Ok(ThemeOutcome::Planned {
            slug: theme.slug,
            path: path.to_path_buf(),
            bytes,
        });
    }

    write_atomic(path, theme.html.as_bytes())?;
    tracing::info!(slug = %theme.slug, style = %theme.style, path = %path.display(), bytes, "theme written");
    Ok(ThemeOutcome::Written {
        slug: theme.slug,
        path: path.to_path_buf(),
        bytes,
    })
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ThemeError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".invoice")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| ThemeError::io(path, e))?;
    temp.write_all(contents)
        .map_err(|e| ThemeError::io(path, e))?;
    temp.as_file_mut()
        .sync_all()
        .map_err(|e| ThemeError::io(path, e))?;
    temp.persist(path)
        .map_err(|e| ThemeError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleRegistry;

    fn materializer() -> Materializer {
        Materializer::new(StyleRegistry::builtin()).unwrap()
    }

    #[test]
    fn test_path_for() {
        let options = GenerateOptions::new("out");
        assert_eq!(options.path_for("print"), PathBuf::from("out/print.html"));
    }

    #[test]
    fn test_default_options() {
        let options = GenerateOptions::default();
        assert_eq!(options.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(options.policy, FailurePolicy::Isolate);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.html");
        std::fs::write(&path, "old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        // No temporary files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_check_batch_marks_all_duplicates() {
        let defs = vec![
            ThemeDef::new("Acme", "print"),
            ThemeDef::new("Other", "glass"),
            ThemeDef::new("ACME", "ribbon-top"),
        ];
        let checked = check_batch(&materializer(), &defs);
        assert!(matches!(
            checked[0].1,
            Err(ThemeError::DuplicateSlug { count: 2, .. })
        ));
        assert!(checked[1].1.is_ok());
        assert!(matches!(checked[2].1, Err(ThemeError::DuplicateSlug { .. })));
    }

    #[test]
    fn test_first_error_prefers_duplicates() {
        let defs = vec![
            ThemeDef::new("Bad", "nope"),
            ThemeDef::new("Acme", "print"),
            ThemeDef::new("Acme", "glass"),
        ];
        let err = first_error(check_batch(&materializer(), &defs));
        assert!(matches!(err, ThemeError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let options = GenerateOptions::new(&out).with_dry_run(true);
        let report = generate(&materializer(), &[ThemeDef::new("Print", "print")], &options).unwrap();
        assert_eq!(report.planned().count(), 1);
        assert!(report.is_success());
        assert!(!out.exists());
    }

    #[test]
    fn test_outcomes_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let defs = vec![
            ThemeDef::new("Print", "print"),
            ThemeDef::new("Bad", "nope"),
            ThemeDef::new("Glass", "glass"),
        ];
        let report = generate(&materializer(), &defs, &GenerateOptions::new(dir.path())).unwrap();
        let slugs: Vec<&str> = report.outcomes.iter().map(ThemeOutcome::slug).collect();
        assert_eq!(slugs, vec!["print", "bad", "glass"]);
        assert!(!report.is_success());
        assert!(report.get("bad").unwrap().is_failure());
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = ThemeOutcome::Failed {
            slug: "acme".to_string(),
            message: "boom".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "failed", "slug": "acme", "message": "boom"})
        );
    }

    #[test]
    fn test_unwritable_out_dir_fails_each_pending_theme() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let options = GenerateOptions::new(blocker.join("sub"));
        let defs = vec![
            ThemeDef::new("Print", "print"),
            ThemeDef::new("Mystery", "nonexistent-style"),
            ThemeDef::new("Glass", "glass"),
        ];

        let report = generate(&materializer(), &defs, &options).unwrap();
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.failed().count(), 3);
        for slug in ["print", "glass"] {
            let Some(ThemeOutcome::Failed { message, .. }) = report.get(slug) else {
                panic!("{slug} should have failed");
            };
            assert!(message.starts_with("failed to write"), "{message}");
            assert!(message.contains("sub"), "{message}");
        }
        let Some(ThemeOutcome::Failed { message, .. }) = report.get("mystery") else {
            panic!("mystery should have failed");
        };
        assert!(message.contains("nonexistent-style"), "{message}");
    }

    #[test]
    fn test_unwritable_out_dir_fail_fast() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let options =
            GenerateOptions::new(blocker.join("sub")).with_policy(FailurePolicy::FailFast);
        let err = generate(&materializer(), &[ThemeDef::new("Print", "print")], &options).unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }
}
