//! Audit Log Concurrency Tests
//!
//! K writers appending M failures each must leave exactly K×M well-formed
//! data rows and a single header row.

use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use fieldguard::observability::{AuditLog, AuditRecord, CsvAuditLog, AUDIT_HEADER};
use fieldguard::schema::{Constraint, FieldFailure};
use tempfile::TempDir;

const WRITERS: usize = 8;
const FAILURES_PER_CALL: usize = 5;
const CALLS_PER_WRITER: usize = 4;

fn failures_for(writer: usize) -> Vec<FieldFailure> {
    (0..FAILURES_PER_CALL)
        .map(|i| {
            FieldFailure::new(
                &format!("Writer{}Request", writer),
                &format!("Field{}", i),
                Constraint::MaxLength(30),
            )
        })
        .collect()
}

#[test]
fn test_concurrent_appends_keep_every_row() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("validation_errors.csv");
    let log = Arc::new(CsvAuditLog::new(&path));
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let log = Arc::clone(&log);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let failures = failures_for(writer);
                barrier.wait();
                for _ in 0..CALLS_PER_WRITER {
                    log.record_failures(&failures).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], AUDIT_HEADER.join(","));
    assert_eq!(
        lines.iter().filter(|l| **l == AUDIT_HEADER.join(",")).count(),
        1
    );

    let rows: Vec<AuditRecord> = csv::Reader::from_path(&path)
        .unwrap()
        .deserialize()
        .map(|row| row.unwrap())
        .collect();
    assert_eq!(rows.len(), WRITERS * CALLS_PER_WRITER * FAILURES_PER_CALL);

    for row in &rows {
        assert!(row.field_path.starts_with("Writer"));
        assert_eq!(row.error_tag, "max");
    }
}

#[test]
fn test_one_call_rows_are_contiguous() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("validation_errors.csv");
    let log = Arc::new(CsvAuditLog::new(&path));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let log = Arc::clone(&log);
            thread::spawn(move || log.record_failures(&failures_for(writer)).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let rows: Vec<AuditRecord> = csv::Reader::from_path(&path)
        .unwrap()
        .deserialize()
        .map(|row| row.unwrap())
        .collect();

    // Each call's rows form one uninterrupted block in field order
    for block in rows.chunks(FAILURES_PER_CALL) {
        let owner = block[0].field_path.split('.').next().unwrap();
        for (i, row) in block.iter().enumerate() {
            assert_eq!(row.field_path, format!("{}.Field{}", owner, i));
            assert_eq!(row.timestamp, block[0].timestamp);
        }
    }
}

#[test]
fn test_header_once_across_sequential_calls() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("validation_errors.csv");
    let log = CsvAuditLog::new(&path);

    for n in 0..10 {
        log.record_failures(&failures_for(n)).unwrap();
    }

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.matches("timestamp,struct_and_field_name,error_tag").count(), 1);
    assert_eq!(contents.lines().count(), 1 + 10 * FAILURES_PER_CALL);
}
