//! Unit tests for the audit report.

use camino::Utf8PathBuf;
use csv::StringRecord;
use rstest::{fixture, rstest};

use super::helpers::{Workspace, solved_square_record, square_record};
use super::*;
use crate::audit::{AUDIT_HEADER, AuditRow, audit_file, run_audit_with};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn parse_report(bytes: &[u8]) -> Vec<StringRecord> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes)
        .records()
        .collect::<Result<_, _>>()
        .expect("report parses as CSV with a fixed column count")
}

fn rendered(row: &AuditRow) -> Vec<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.serialize(row.to_line()).expect("row serialises");
    let bytes = writer.into_inner().expect("row flushed");
    parse_report(&bytes)
        .first()
        .expect("one record")
        .iter()
        .map(str::to_owned)
        .collect()
}

fn audit_report(paths: Vec<Utf8PathBuf>) -> Vec<StringRecord> {
    let mut buffer = Vec::new();
    run_audit_with(&AuditArgs { paths }, &mut buffer).expect("report written");
    parse_report(&buffer)
}

#[rstest]
fn stored_optimum_passes(workspace: Workspace) {
    let path = workspace.write_record("square.json", &solved_square_record(40, 15));
    let row = audit_file(&path).expect("audit runs");
    assert!(row.passed);
    assert_eq!((row.length, row.value), (Some(40), Some(15)));
    assert_eq!(row.dimension, 4);
    assert_eq!(
        rendered(&row),
        ["square", "true", "0.010s", "15", "15", "0.0000", "4", "40", "15", ""]
    );
}

#[rstest]
fn routes_over_budget_fail_the_audit(workspace: Workspace) {
    let path = workspace.write_record("square.json", &solved_square_record(39, 15));
    let row = audit_file(&path).expect("audit runs");
    assert!(!row.passed);
    assert_eq!(row.length, None);
    assert!(row.comment.starts_with("Audit failed:"));
    let columns = rendered(&row);
    assert_eq!(columns.get(7..9), Some(&["NA".to_owned(), "NA".to_owned()][..]));
}

#[rstest]
fn objective_must_match_the_route_value(workspace: Workspace) {
    let path = workspace.write_record("square.json", &solved_square_record(40, 20));
    let row = audit_file(&path).expect("audit runs");
    assert!(!row.passed);
    assert_eq!(row.comment, "Route is worth 15 but the objective is 20.");
}

#[rstest]
fn unsolved_instances_are_errors(workspace: Workspace) {
    let path = workspace.write_record("square.json", &square_record(40));
    let err = audit_file(&path).expect_err("no solution stored");
    match err {
        CliError::MissingSolution { path: unsolved } => assert_eq!(unsolved, path),
        other => panic!("expected MissingSolution, found {other:?}"),
    }
}

#[rstest]
fn report_lists_every_file_after_the_header(workspace: Workspace) {
    let mut quoted = solved_square_record(40, 15);
    if let Some(solution) = quoted.solution.as_mut() {
        solution.comment = "said \"done\" ".into();
    }
    let records = audit_report(vec![
        workspace.write_record("a.json", &solved_square_record(40, 15)),
        workspace.write_record("b.json", &quoted),
    ]);

    assert_eq!(records.len(), 3);
    let header = records.first().expect("header record");
    assert_eq!(header.iter().collect::<Vec<_>>(), AUDIT_HEADER);
    let last = records.last().expect("second row");
    assert_eq!(last.get(9), Some("said \"done\""));
}

#[rstest]
#[case("berlin,52")]
#[case("quoted \"west\" loop")]
#[case("two\nlines")]
fn instance_names_keep_their_column(workspace: Workspace, #[case] name: &str) {
    let mut record = solved_square_record(40, 15);
    record.name = name.into();
    let records = audit_report(vec![workspace.write_record("named.json", &record)]);

    assert_eq!(records.len(), 2);
    let row = records.last().expect("one row after the header");
    assert_eq!(row.len(), AUDIT_HEADER.len());
    assert_eq!(row.get(0), Some(name));
    assert_eq!(row.get(7), Some("40"));
    assert_eq!(row.get(8), Some("15"));
}
