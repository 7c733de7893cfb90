//! Audit command: re-check stored solutions and summarise them as CSV.

use std::fmt;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use orienteer_core::audit_route;
use serde::Serialize;

use crate::files::load_instance;
use crate::{ARG_AUDIT_PATHS, CliError};

/// Column header printed before the audit rows.
pub(crate) const AUDIT_HEADER: [&str; 10] = [
    "Name",
    "Optimal",
    "Time",
    "Obj",
    "UBound",
    "Gap",
    "Dimension",
    "Length",
    "Value",
    "Comment",
];

/// CLI arguments for the `audit` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(about = "Check stored solutions and print a CSV summary")]
pub(crate) struct AuditArgs {
    /// Solved instance files to check.
    #[arg(id = ARG_AUDIT_PATHS, value_name = "path", required = true)]
    pub(crate) paths: Vec<Utf8PathBuf>,
}

pub(crate) fn run_audit(args: &AuditArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_audit_with(args, &mut stdout)
}

pub(crate) fn run_audit_with(args: &AuditArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut report = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    report
        .write_record(AUDIT_HEADER)
        .map_err(CliError::WriteReport)?;
    for path in &args.paths {
        let row = audit_file(path)?;
        if !row.passed {
            log::warn!("{path}: {}", row.comment);
        }
        report
            .serialize(row.to_line())
            .map_err(CliError::WriteReport)?;
    }
    report
        .flush()
        .map_err(|err| CliError::WriteReport(err.into()))
}

/// One CSV line of the audit report.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AuditRow {
    pub(crate) name: String,
    pub(crate) optimal: bool,
    pub(crate) time: String,
    pub(crate) obj: i64,
    pub(crate) ubound: i64,
    pub(crate) gap: Option<f64>,
    pub(crate) dimension: usize,
    pub(crate) length: Option<i64>,
    pub(crate) value: Option<i64>,
    pub(crate) passed: bool,
    pub(crate) comment: String,
}

/// Load a solved instance and check its route.
///
/// Route problems are reported in the row comment; only unreadable or
/// unsolved files are errors.
pub(crate) fn audit_file(path: &Utf8Path) -> Result<AuditRow, CliError> {
    let record = load_instance(path)?;
    let instance = record
        .to_instance()
        .map_err(|source| CliError::InvalidInstance {
            path: path.to_path_buf(),
            source,
        })?;
    let solution = record
        .solution
        .as_ref()
        .ok_or_else(|| CliError::MissingSolution {
            path: path.to_path_buf(),
        })?;

    let mut row = AuditRow {
        name: record.name.clone(),
        optimal: solution.optimal,
        time: solution.time.clone(),
        obj: solution.obj,
        ubound: solution.ubound,
        gap: solution.gap_percent(),
        dimension: instance.node_count(),
        length: None,
        value: None,
        passed: true,
        comment: solution.comment.trim_end().to_owned(),
    };
    match audit_route(&instance, &solution.route) {
        Ok(summary) => {
            row.length = Some(summary.length);
            row.value = Some(summary.value);
            if summary.value != solution.obj {
                row.fail(&format!(
                    "Route is worth {} but the objective is {}.",
                    summary.value, solution.obj
                ));
            }
            if summary.length != solution.route_cost {
                row.fail(&format!(
                    "Route length is {} but the record says {}.",
                    summary.length, solution.route_cost
                ));
            }
        }
        Err(err) => row.fail(&format!("Audit failed: {err}.")),
    }
    Ok(row)
}

impl AuditRow {
    fn fail(&mut self, message: &str) {
        self.passed = false;
        if !self.comment.is_empty() {
            self.comment.push(' ');
        }
        self.comment.push_str(message);
    }
}

fn optional<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "NA".to_owned(), |inner| inner.to_string())
}

/// Serialisable view of an [`AuditRow`], one field per [`AUDIT_HEADER`] column.
#[derive(Debug, Serialize)]
pub(crate) struct AuditLine<'a> {
    name: &'a str,
    optimal: bool,
    time: &'a str,
    obj: i64,
    ubound: i64,
    gap: String,
    dimension: usize,
    length: String,
    value: String,
    comment: &'a str,
}

impl AuditRow {
    /// Render the row with `NA` for missing figures and a 4-digit gap.
    pub(crate) fn to_line(&self) -> AuditLine<'_> {
        AuditLine {
            name: &self.name,
            optimal: self.optimal,
            time: &self.time,
            obj: self.obj,
            ubound: self.ubound,
            gap: self
                .gap
                .map_or_else(|| "NA".to_owned(), |gap| format!("{gap:.4}")),
            dimension: self.dimension,
            length: optional(self.length),
            value: optional(self.value),
            comment: &self.comment,
        }
    }
}
