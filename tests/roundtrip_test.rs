//! Integration tests for full compress/decompress round trips.
//!
//! This file contains tests for:
//! - End-to-end compress → decompress equivalence on multi-record streams.
//! - The documented price normalization deviation surviving a round trip.
//! - Debug-mode output omitting the dictionary.
//! - Truncated and corrupt binary input producing errors rather than panics.
//! - The same round trip driven over real files, matching what the CLI binary does.

use std::fs::File;
use std::io::{Cursor, Read, Write};

use ticktape::{compress, decompress, CodecError, Config};

fn round_trip(csv: &str) -> String {
    let mut input = Cursor::new(csv.as_bytes().to_vec());
    let mut binary = Vec::new();
    compress(&mut input, &mut binary, &Config::compress(false)).unwrap();

    let mut binary_input = Cursor::new(binary);
    let mut out = Vec::new();
    decompress(&mut binary_input, &mut out, &Config::decompress()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn single_record_round_trips_exactly() {
    let csv = "AAPL,N,A,@,100,100,150.25,500\r\n";
    assert_eq!(round_trip(csv), csv);
}

#[test]
fn trailing_dot_price_normalizes_on_round_trip() {
    let csv = "AAPL,N,A,@,0,0,12.,1\r\n";
    let expected = "AAPL,N,A,@,0,0,12,1\r\n";
    assert_eq!(round_trip(csv), expected);
}

#[test]
fn leading_dot_price_normalizes_on_round_trip() {
    let csv = "AAPL,N,A,@,0,0,.5,1\r\n";
    let expected = "AAPL,N,A,@,0,0,0.5,1\r\n";
    assert_eq!(round_trip(csv), expected);
}

#[test]
fn multiple_tickers_and_sides_round_trip() {
    let csv = "AAPL,N,A,@,100,100,150.25,500\r\n\
               MSFT,O,B,X,200,200,310.10,10\r\n\
               AAPL,N,a,@,101,99,150.30,20\r\n\
               GOOG,Q,T,@,300,300,2750.0,5\r\n";
    assert_eq!(round_trip(csv), csv);
}

#[test]
fn exchange_carry_across_records() {
    let csv = "AAPL,N,A,@,1,1,1.0,1\r\n\
               AAPL,N,A,@,2,2,1.0,1\r\n\
               AAPL,O,A,@,3,3,1.0,1\r\n";
    assert_eq!(round_trip(csv), csv);
}

#[test]
fn delta_boundary_at_254_round_trips() {
    let csv = "AAPL,N,A,@,1000,1000,1.0,1\r\n\
               AAPL,N,A,@,1254,1254,1.0,1\r\n\
               AAPL,N,A,@,1509,1509,1.0,1\r\n";
    assert_eq!(round_trip(csv), csv);
}

#[test]
fn delta_beyond_254_round_trips_with_full_timestamp() {
    let csv = "AAPL,N,A,@,1000,1000,1.0,1\r\n\
               AAPL,N,A,@,1255,1255,1.0,1\r\n";
    assert_eq!(round_trip(csv), csv);
}

#[test]
fn large_price_and_size_round_trip_without_small_field_optimization() {
    let csv = "AAPL,N,A,@,0,0,99999.99,100000\r\n";
    assert_eq!(round_trip(csv), csv);
}

#[test]
fn debug_mode_output_omits_the_dictionary() {
    let csv = "AAPL,N,A,@,100,100,150.25,500\r\n";
    let mut input = Cursor::new(csv.as_bytes().to_vec());
    let mut binary = Vec::new();
    compress(&mut input, &mut binary, &Config::compress(true)).unwrap();

    assert!(!String::from_utf8_lossy(&binary).contains("ENDOFDICTIONARY"));

    // Since the dictionary never made it to `output`, decoding it must fail rather than
    // silently produce garbage records.
    let mut binary_input = Cursor::new(binary);
    let mut out = Vec::new();
    let result = decompress(&mut binary_input, &mut out, &Config::decompress());
    assert!(result.is_err());
}

#[test]
fn unknown_side_character_fails_compression() {
    let csv = "AAPL,N,Z,@,0,0,1.0,1\r\n";
    let mut input = Cursor::new(csv.as_bytes().to_vec());
    let mut binary = Vec::new();
    let err = compress(&mut input, &mut binary, &Config::compress(false)).unwrap_err();
    assert!(matches!(err, CodecError::UnknownSide { .. }));
}

#[test]
fn malformed_line_fails_compression() {
    let csv = "AAPL,N,A,@,0,0,1.0\r\n";
    let mut input = Cursor::new(csv.as_bytes().to_vec());
    let mut binary = Vec::new();
    let err = compress(&mut input, &mut binary, &Config::compress(false)).unwrap_err();
    assert!(matches!(err, CodecError::MalformedRecord { .. }));
}

#[test]
fn truncated_binary_input_fails_decompression() {
    let csv = "AAPL,N,A,@,100,100,150.25,500\r\n";
    let mut input = Cursor::new(csv.as_bytes().to_vec());
    let mut binary = Vec::new();
    compress(&mut input, &mut binary, &Config::compress(false)).unwrap();

    binary.truncate(binary.len() - 2);

    let mut binary_input = Cursor::new(binary);
    let mut out = Vec::new();
    let err = decompress(&mut binary_input, &mut out, &Config::decompress()).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedInput { .. }));
}

#[test]
fn round_trip_over_real_files_matches_in_memory_round_trip() {
    let csv = "AAPL,N,A,@,100,100,150.25,500\r\n\
               MSFT,O,B,X,200,200,310.10,10\r\n";

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("input.csv");
    let binary_path = dir.path().join("compressed.bin");
    let restored_path = dir.path().join("restored.csv");

    File::create(&csv_path).unwrap().write_all(csv.as_bytes()).unwrap();

    let mut input = File::open(&csv_path).unwrap();
    let mut binary = File::create(&binary_path).unwrap();
    compress(&mut input, &mut binary, &Config::compress(false)).unwrap();

    let mut binary_input = File::open(&binary_path).unwrap();
    let mut restored = File::create(&restored_path).unwrap();
    decompress(&mut binary_input, &mut restored, &Config::decompress()).unwrap();

    let mut restored_text = String::new();
    File::open(&restored_path).unwrap().read_to_string(&mut restored_text).unwrap();
    assert_eq!(restored_text, csv);
}
