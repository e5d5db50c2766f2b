//! Integration tests for record assembly through the public API.
//!
//! These tests cover newline normalization, value concatenation, prefixes and
//! one-line encoding as seen by a sink owned by the caller.

use std::fmt::Display;

use proptest::prelude::*;
use stdlog::{Logger, print_to};
use test_support::SharedBuffer;

fn plain_logger() -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    (Logger::new(buffer.clone(), "", false, false), buffer)
}

// ============================================================================
// Reference call sequences
// ============================================================================

#[test]
fn plain_sequence_matches_reference_output() {
    let (logger, buffer) = plain_logger();

    logger.print(&[&"test"]);
    assert_eq!(buffer.text(), "test\n");

    logger.print(&[&"test", &"test"]);
    assert_eq!(buffer.text(), "test\ntesttest\n");

    logger.print(&[&"test\n"]);
    logger.print(&[&"test", &"test\n"]);
    assert_eq!(buffer.text(), "test\ntesttest\ntest\ntesttest\n");
}

#[test]
fn one_line_sequence_matches_reference_output() {
    let buffer = SharedBuffer::new();
    let logger = Logger::new(buffer.clone(), "", false, true);

    logger.print(&[&"test"]);
    logger.print(&[&"test", &"test"]);
    logger.print(&[&"test\n"]);
    logger.print(&[&"test", &"test\n"]);

    assert_eq!(
        buffer.text(),
        "\"test\\n\"\n\"testtest\\n\"\n\"test\\n\"\n\"testtest\\n\"\n"
    );
}

#[test]
fn macro_sequence_matches_direct_calls() {
    let (logger, buffer) = plain_logger();

    print_to!(logger, "test");
    print_to!(logger, "test", "test");
    print_to!(logger, "test\n");
    print_to!(logger, "test", "test\n");

    assert_eq!(buffer.text(), "test\ntesttest\ntest\ntesttest\n");
}

// ============================================================================
// Prefix composition
// ============================================================================

#[test]
fn prefix_without_timestamp() {
    let buffer = SharedBuffer::new();
    let logger = Logger::new(buffer.clone(), "svc: ", false, false);
    logger.print(&[&"hi"]);
    assert_eq!(buffer.text(), "svc: hi\n");
}

#[test]
fn prefix_with_timestamp_has_iso8601_millisecond_stamp() {
    let buffer = SharedBuffer::new();
    let logger = Logger::new(buffer.clone(), "svc: ", true, false);
    logger.print(&[&"hi"]);

    let text = buffer.text();
    let stamp = text
        .strip_prefix("svc: ")
        .and_then(|rest| rest.strip_suffix(" hi\n"))
        .expect("record shape is prefix, stamp, space, body");

    let bytes = stamp.as_bytes();
    for index in [0, 1, 2, 3, 5, 6, 8, 9, 11, 12, 14, 15, 17, 18, 20, 21, 22] {
        assert!(bytes[index].is_ascii_digit(), "digit expected at {index} in {stamp:?}");
    }
    assert_eq!(&stamp[4..5], "-");
    assert_eq!(&stamp[7..8], "-");
    assert_eq!(&stamp[10..11], "T");
    assert_eq!(&stamp[13..14], ":");
    assert_eq!(&stamp[16..17], ":");
    assert_eq!(&stamp[19..20], ".");

    let zone = &stamp[23..];
    assert!(
        zone == "Z" || (zone.len() == 6 && (zone.starts_with('+') || zone.starts_with('-'))),
        "unexpected zone {zone:?}"
    );
}

#[test]
fn unicode_payload_is_written_unchanged() {
    let (logger, buffer) = plain_logger();
    logger.print(&[&"héllo ", &"wörld ", &"✓"]);
    assert_eq!(buffer.text(), "héllo wörld ✓\n");
}

#[test]
fn long_records_are_written_in_one_piece() {
    let (logger, buffer) = plain_logger();
    let long = "x".repeat(200_000);
    logger.print(&[&long]);
    assert_eq!(buffer.len(), 200_001);
    assert!(buffer.text().ends_with("x\n"));
}

// ============================================================================
// Properties
// ============================================================================

fn expected_record(parts: &[String]) -> String {
    let mut joined = parts.concat();
    if !joined.ends_with('\n') {
        joined.push('\n');
    }
    joined
}

proptest! {
    #[test]
    fn print_adds_at_most_one_newline(parts in prop::collection::vec(".{0,12}\n{0,3}", 0..5)) {
        let (logger, buffer) = plain_logger();
        let values: Vec<&dyn Display> = parts.iter().map(|part| part as &dyn Display).collect();
        logger.print(&values);
        prop_assert_eq!(buffer.text(), expected_record(&parts));
    }

    #[test]
    fn one_line_records_hold_exactly_one_line(parts in prop::collection::vec(".{0,12}\n{0,3}", 1..5)) {
        let buffer = SharedBuffer::new();
        let logger = Logger::new(buffer.clone(), "", false, true);
        let values: Vec<&dyn Display> = parts.iter().map(|part| part as &dyn Display).collect();
        logger.print(&values);

        let text = buffer.text();
        prop_assert_eq!(text.matches('\n').count(), 1);
        prop_assert!(text.ends_with("\\n\"\n"));
    }
}
