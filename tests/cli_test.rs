use std::io::{Cursor, Write};

use anyhow::Result;
use tally::Settings;
use tally::cli::{OutputFormat, run_replay, run_session};
use tally::domain::LedgerSnapshot;
use tempfile::NamedTempFile;

const CSV: &str = "\
date,description,category,amount
2023-05-01,Salary,Work,100
2023-05-02,Groceries,Food,-30
2023-05-03,,Food,-12
2023-05-04,Refund,Shopping,5.5
bad-date,Lunch,Food,-8
";

#[test]
fn test_replay_table_output() -> Result<()> {
    let mut output = Vec::new();
    let summary = run_replay(
        Cursor::new(CSV),
        &mut output,
        OutputFormat::Table,
        Settings::default(),
    )?;

    assert_eq!(summary.accepted, 3);
    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.ledger.total_balance, 75.5);

    let text = String::from_utf8(output)?;
    assert!(text.contains("Total Balance: $75.5"));
    assert_eq!(
        text.matches("An error occurred. Please check your inputs.")
            .count(),
        2
    );
    assert!(text.contains("Accepted 3, rejected 2"));
    Ok(())
}

#[test]
fn test_replay_json_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(CSV.as_bytes())?;

    let mut output = Vec::new();
    run_replay(
        std::fs::File::open(file.path())?,
        &mut output,
        OutputFormat::Json,
        Settings::default(),
    )?;

    let snapshot: LedgerSnapshot = serde_json::from_slice(&output)?;
    let descriptions: Vec<&str> = snapshot
        .entries
        .iter()
        .map(|e| e.description())
        .collect();
    assert_eq!(descriptions, vec!["Salary", "Groceries", "Refund"]);
    assert_eq!(snapshot.total_balance, 75.5);
    assert_eq!(snapshot.entries[0].date().as_str(), "2023-05-01");
    Ok(())
}

#[test]
fn test_replay_missing_column_is_rejected() -> Result<()> {
    let csv = "date,description,category\n2023-05-01,Coffee,Food\n";
    let summary = run_replay(
        Cursor::new(csv),
        std::io::sink(),
        OutputFormat::Table,
        Settings::default(),
    )?;

    assert_eq!(summary.accepted, 0);
    assert_eq!(summary.rejected, 1);
    Ok(())
}

#[test]
fn test_replay_continues_past_undecodable_row() -> Result<()> {
    let mut csv = b"date,description,category,amount\n".to_vec();
    csv.extend_from_slice(b"2023-05-01,Salary,Work,100\n");
    csv.extend_from_slice(b"2023-05-02,\xFF\xFE,Food,-3\n");
    csv.extend_from_slice(b"2023-05-03,Refund,Shopping,5.5\n");

    let mut output = Vec::new();
    let summary = run_replay(
        Cursor::new(csv),
        &mut output,
        OutputFormat::Table,
        Settings::default(),
    )?;

    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.ledger.total_balance, 105.5);

    let text = String::from_utf8(output)?;
    assert!(text.contains("Error: An error occurred. Please check your inputs."));
    assert!(text.contains("Accepted 2, rejected 1"));
    Ok(())
}

#[test]
fn test_session_continues_past_undecodable_line() -> Result<()> {
    let mut input = b"2023-05-01\nCoffee\nFood\n\xFF\n".to_vec();
    input.extend_from_slice(b"2023-05-02\nTea\nFood\n-2\n");

    let summary = run_session(Cursor::new(input), std::io::sink(), Settings::default())?;

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.ledger.entries[0].description(), "Tea");
    Ok(())
}

#[test]
fn test_session_summary_pluralizes() -> Result<()> {
    let input = "2023-05-01\nA\nX\n1\n2023-05-02\nB\nX\n2\n";
    let mut output = Vec::new();
    run_session(Cursor::new(input), &mut output, Settings::default())?;

    let text = String::from_utf8(output)?;
    assert!(text.trim_end().ends_with("2 entries, balance 3"));
    Ok(())
}

#[test]
fn test_session_reads_fields_in_order() -> Result<()> {
    let input = "2023-05-01\nCoffee\nFood\n-4.5\n2023-05-02\n\nFood\n3\n2023-05-03\nBook\n";
    let mut output = Vec::new();

    let summary = run_session(Cursor::new(input), &mut output, Settings::default())?;

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.ledger.total_balance, -4.5);

    let text = String::from_utf8(output)?;
    assert!(text.starts_with("date: description: category: amount: "));
    assert!(text.contains("expense"));
    assert!(text.contains("Transaction added successfully."));
    assert!(text.trim_end().ends_with("1 entry, balance -4.5"));
    Ok(())
}

#[test]
fn test_session_keeps_whitespace_and_crlf() -> Result<()> {
    let input = "2023-05-01\r\n  \r\nMisc\r\n10\r\n";
    let summary = run_session(Cursor::new(input), std::io::sink(), Settings::default())?;

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.ledger.entries[0].description(), "  ");
    Ok(())
}
