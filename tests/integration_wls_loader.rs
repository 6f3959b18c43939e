//! Integration tests for the WLS decode-and-load pipeline
//!
//! These tests write realistic fixture files to a temporary directory and
//! run them through the public decoder, loader, and store APIs to verify
//! end-to-end behavior: variant handling, idempotence, and the unique
//! (site, range cell, timestamp) invariant.

use std::path::PathBuf;

use tempfile::TempDir;

use waves_loader::app::adapters::filesystem::find_wls_files;
use waves_loader::{Error, ObservationStore, SqliteStore, WaveLoader, WlsDecoder};

/// A realistic annotated-variant file: header metadata, a comment line,
/// and two annotated table blocks
const ANNOTATED_WLS: &str = "\
%CTF: 1.00
%%This file is processed by the vendor toolchain
%FileType: WVM wls \"WaveModel\"
%Site: PRIO \"Cabo Prioriño\"
%TimeStamp: 2022 02 01 00 00 00
%TableType: WVM1 WM01
%TableColumnTypes: TIME TYRS TMON TDAY THRS TMIN TSEC MWHT MWPD WAVB
%TableStart: 1
% RangeCell: 2
0 2022 2 1 0 0 0 2.41 9.00 295.0
600 2022 2 1 0 10 0 2.38 8.80 290.0
%TableEnd: 1
%TableStart: 2
% RangeCell: 3
0 2022 2 1 0 0 0 1.95 7.50 301.0
%TableEnd: 2
";

/// The older column-variant layout: two rows repeating annotated triples
/// (seconds offsets must not create new ones) plus one genuinely new row
const GROUPED_WLS: &str = "\
%Site: PRIO \"Cabo Prioriño\"
%TableColumnTypes: TYRS TMON TDAY THRS TMIN TSEC RCLL MWHT MWPD WAVB
%TableStart: 1
2022 2 1 0 0 30 2.00 2.41 9.00 295.0
2022 2 1 0 10 30 2.00 2.38 8.80 290.0
2022 2 1 0 20 30 3.00 1.95 7.50 301.0
%TableEnd: 1
";

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_end_to_end_annotated_file() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "WVLM_PRIO_2022_02_01_0000.wls", ANNOTATED_WLS);

    let store = SqliteStore::open_in_memory().unwrap();
    store.add_site("PRIO").unwrap();

    let decoded = WlsDecoder::new().decode_file(&file).unwrap();
    assert_eq!(decoded.range_cells(), vec![2, 3]);
    assert_eq!(
        decoded.metadata.get("Site").map(String::as_str),
        Some("PRIO \"Cabo Prioriño\"")
    );

    let report = WaveLoader::new().load("PRIO", &decoded, &store).unwrap();
    assert_eq!(report.rows_seen, 3);
    assert_eq!(report.inserted, 3);
    assert_eq!(report.rows_skipped(), 0);
    assert_eq!(store.observation_count().unwrap(), 3);
}

#[test]
fn test_reloading_the_same_file_inserts_nothing() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "waves.wls", ANNOTATED_WLS);

    let store = SqliteStore::open_in_memory().unwrap();
    store.add_site("PRIO").unwrap();

    let decoder = WlsDecoder::new();
    let loader = WaveLoader::new();

    let decoded = decoder.decode_file(&file).unwrap();
    loader.load("PRIO", &decoded, &store).unwrap();

    // Decode the file again from disk to prove nothing depends on shared state
    let decoded_again = decoder.decode_file(&file).unwrap();
    let second = loader.load("PRIO", &decoded_again, &store).unwrap();

    assert_eq!(second.inserted, 0);
    assert_eq!(second.already_present, 3);
    assert_eq!(store.observation_count().unwrap(), 3);
}

#[test]
fn test_annotated_and_grouped_files_share_one_store() {
    let dir = TempDir::new().unwrap();
    let annotated = write_fixture(&dir, "new_layout.wls", ANNOTATED_WLS);
    let grouped = write_fixture(&dir, "old_layout.wls", GROUPED_WLS);

    let store = SqliteStore::open_in_memory().unwrap();
    store.add_site("PRIO").unwrap();

    let decoder = WlsDecoder::new();
    let loader = WaveLoader::new();

    let first = loader
        .load("PRIO", &decoder.decode_file(&annotated).unwrap(), &store)
        .unwrap();
    assert_eq!(first.inserted, 3);

    // The grouped file repeats range cell 2 at the same minutes (differing
    // only by seconds) and adds a new range cell 3 row at 00:20
    let second = loader
        .load("PRIO", &decoder.decode_file(&grouped).unwrap(), &store)
        .unwrap();

    assert_eq!(second.rows_seen, 3);
    assert_eq!(second.already_present, 2);
    assert_eq!(second.inserted, 1);
    assert_eq!(store.observation_count().unwrap(), 4);
}

#[test]
fn test_unknown_site_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "waves.wls", ANNOTATED_WLS);

    let store = SqliteStore::open_in_memory().unwrap();
    store.add_site("PRIO").unwrap();

    let decoded = WlsDecoder::new().decode_file(&file).unwrap();
    let result = WaveLoader::new().load("NOPE", &decoded, &store);

    assert!(matches!(result, Err(Error::UnknownSite { .. })));
    assert_eq!(store.observation_count().unwrap(), 0);
}

#[test]
fn test_file_without_header_fails_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(
        &dir,
        "broken.wls",
        "%Site: PRIO\n%TableStart: 1\n0 1 2\n%TableEnd: 1\n",
    );

    let result = WlsDecoder::new().decode_file(&file);
    assert!(matches!(result, Err(Error::MissingHeader { .. })));
}

#[test]
fn test_directory_discovery_feeds_the_pipeline() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "b.wls", GROUPED_WLS);
    write_fixture(&dir, "a.wls", ANNOTATED_WLS);
    write_fixture(&dir, "README.txt", "not a wave file");

    let store = SqliteStore::open_in_memory().unwrap();
    store.add_site("PRIO").unwrap();

    let decoder = WlsDecoder::new();
    let loader = WaveLoader::new();

    let files = find_wls_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    for file in &files {
        let decoded = decoder.decode_file(file).unwrap();
        loader.load("PRIO", &decoded, &store).unwrap();
    }

    // 3 from the annotated file, plus the one grouped row not colliding
    // with an annotated triple
    assert_eq!(store.observation_count().unwrap(), 4);
}

#[test]
fn test_bytes_outside_utf8_do_not_abort_decoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mangled.wls");

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"%Site: PR");
    bytes.push(0xFF); // stray byte inside a header line
    bytes.extend_from_slice(b"IO\n");
    bytes.extend_from_slice(
        b"%TableColumnTypes: RCLL MWHT\n%TableStart: 1\n1.00 2.41\n%TableEnd: 1\n",
    );
    std::fs::write(&path, bytes).unwrap();

    let decoded = WlsDecoder::new().decode_file(&path).unwrap();
    assert_eq!(decoded.row_count(), 1);
}
