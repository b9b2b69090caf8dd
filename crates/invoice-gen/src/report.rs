//! Turns command results into text, JSON or YAML for stdout.

use std::fmt::Write as _;

use console::Style;
use invoice_render::{GenerationReport, ThemeCatalog, ThemeOutcome};
use serde::Serialize;

use crate::OutputFormat;

#[derive(Debug, Serialize)]
struct ThemeRow {
    slug: String,
    name: String,
    style: String,
    scheme: String,
    accent: Option<String>,
}

fn serialized<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<Option<String>> {
    Ok(match format {
        OutputFormat::Text => None,
        OutputFormat::Json => Some(serde_json::to_string_pretty(value)? + "\n"),
        OutputFormat::Yaml => Some(serde_yaml::to_string(value)?),
    })
}

pub fn styles(names: &[&str], format: OutputFormat) -> anyhow::Result<String> {
    if let Some(out) = serialized(names, format)? {
        return Ok(out);
    }
    let mut out = String::new();
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(out)
}

pub fn themes(catalog: &ThemeCatalog, format: OutputFormat) -> anyhow::Result<String> {
    let rows: Vec<ThemeRow> = catalog
        .iter()
        .map(|def| ThemeRow {
            slug: def.slug().into_owned(),
            name: def.name.clone(),
            style: def.style.clone(),
            scheme: def.scheme.to_string(),
            accent: def.accent.clone(),
        })
        .collect();
    if let Some(out) = serialized(&rows, format)? {
        return Ok(out);
    }

    let slug_width = rows.iter().map(|r| r.slug.len()).max().unwrap_or(0);
    let style_width = rows.iter().map(|r| r.style.len()).max().unwrap_or(0);
    let bold = Style::new().bold();
    let muted = Style::new().dim();

    let mut out = String::new();
    for row in &rows {
        writeln!(
            out,
            "{}  {:<style_width$}  {:<5}  {:<7}  {}",
            bold.apply_to(format!("{:<slug_width$}", row.slug)),
            row.style,
            row.scheme,
            row.accent.as_deref().unwrap_or("-"),
            muted.apply_to(&row.name),
        )?;
    }
    Ok(out)
}

pub fn generation(report: &GenerationReport, format: OutputFormat) -> anyhow::Result<String> {
    if let Some(out) = serialized(report, format)? {
        return Ok(out);
    }

    let slug_width = report
        .outcomes
        .iter()
        .map(|o| o.slug().len())
        .max()
        .unwrap_or(0);
    let ok = Style::new().green();
    let planned = Style::new().cyan();
    let failed = Style::new().red().bold();

    let mut out = String::new();
    for outcome in &report.outcomes {
        match outcome {
            ThemeOutcome::Written { slug, path, bytes } => writeln!(
                out,
                "{} {:<slug_width$}  {} ({bytes} bytes)",
                ok.apply_to("written"),
                slug,
                path.display()
            )?,
            ThemeOutcome::Planned { slug, path, bytes } => writeln!(
                out,
                "{} {:<slug_width$}  {} ({bytes} bytes)",
                planned.apply_to("planned"),
                slug,
                path.display()
            )?,
            ThemeOutcome::Failed { slug, message } => writeln!(
                out,
                "{} {:<slug_width$}  {message}",
                failed.apply_to("failed "),
                slug
            )?,
        }
    }

    let written = report.written().count();
    let planned_count = report.planned().count();
    let failed_count = report.failed().count();
    if planned_count > 0 {
        writeln!(out, "{planned_count} planned, {failed_count} failed (dry run)")?;
    } else {
        writeln!(out, "{written} written, {failed_count} failed")?;
    }
    Ok(out)
}
