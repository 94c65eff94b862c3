//! Text and JSON rendering of reconcile results.

use std::io::{self, Write};

use serde::Serialize;
use spof_detect::{DryRunReport, EdgeVerdict, ReconcileSummary};

use crate::error::CliError;

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Banner, per-family `SPOF / total`, then every SPOF edge with its rules.
pub fn write_dry_run<W: Write>(
    out: &mut W,
    report: &DryRunReport,
    scope: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "Dry-run: no flags written{}", scope_suffix(scope))?;
    for family in &report.families {
        let summary = &family.summary;
        writeln!(
            out,
            "{}: {} SPOF / {} edges",
            summary.family, summary.spof_count, summary.total
        )?;
        for verdict in family.spof_edges() {
            writeln!(out, "  {}", verdict_line(verdict))?;
        }
    }
    writeln!(out, "Total SPOF detected: {}", report.total_spof)?;
    if report.total_changed > 0 {
        writeln!(out, "Pending changes: {} (rerun with --apply)", report.total_changed)?;
    }
    Ok(())
}

pub fn write_apply<W: Write>(
    out: &mut W,
    summary: &ReconcileSummary,
    scope: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "SPOF flags applied{}", scope_suffix(scope))?;
    for family in &summary.families {
        writeln!(
            out,
            "{}: {} SPOF / {} edges, {} changed (+{} -{})",
            family.family,
            family.spof_count,
            family.total,
            family.changed,
            family.added,
            family.cleared
        )?;
    }
    writeln!(out, "Total SPOF detected: {}", summary.total_spof)?;
    writeln!(out, "Total changed: {}", summary.total_changed)?;
    Ok(())
}

fn scope_suffix(scope: Option<&str>) -> String {
    scope.map(|name| format!(" (scope: {name})")).unwrap_or_default()
}

fn verdict_line(verdict: &EdgeVerdict) -> String {
    let rules: Vec<&str> = verdict.rules.iter().map(|r| r.as_str()).collect();
    format!("{} [{}]", verdict.label, rules.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_suffix_only_when_named() {
        assert_eq!(scope_suffix(None), "");
        assert_eq!(scope_suffix(Some("Finance")), " (scope: Finance)");
    }
}
