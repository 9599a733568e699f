//! Boundary conditions: empty files, header-only files, unknown encodings and
//! blank-line noise.

mod common;

use common::{TestWorkspace, site_redirects};
use predicates::str::contains;

// ---------------------------------------------------------------------------
// Empty and header-only inputs
// ---------------------------------------------------------------------------

#[test]
fn empty_manifest_produces_header_only_mapping() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("empty.csv", "");
    site_redirects()
        .args(["identify", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("\"old_url\",\"new_url\"\n")
        .stderr(contains("Found 0 potential redirect(s)"));
}

#[test]
fn header_only_manifest_is_not_an_error() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "header.csv",
        "shipment_contract_number,is_cacao_shipment,serialized\n",
    );
    site_redirects()
        .args(["identify", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("\"old_url\",\"new_url\"\n");
}

#[test]
fn preview_of_header_only_file_reports_no_rows() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("header.csv", "a,b,c");
    site_redirects()
        .args(["preview", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("")
        .stderr(contains("has no data rows"));
}

#[test]
fn plan_of_empty_mapping_prints_nothing() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("mapping.csv", "\n\n");
    site_redirects()
        .args(["plan", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("")
        .stderr(contains("Planned 0 redirect(s)"));
}

// ---------------------------------------------------------------------------
// Encodings and line endings
// ---------------------------------------------------------------------------

#[test]
fn unknown_encoding_label_is_rejected() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("mapping.csv", "old_url,new_url\n/a,/b\n");
    site_redirects()
        .args([
            "plan",
            "-i",
            input.to_str().unwrap(),
            "--input-encoding",
            "klingon",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown encoding 'klingon'"));
}

#[test]
fn latin1_manifest_is_decoded() {
    let workspace = TestWorkspace::new();
    let input = workspace.path().join("latin1.csv");
    let mut bytes = b"shipment_contract_number,shipment_name,is_cacao_shipment\nAGL9,Caf".to_vec();
    bytes.push(0xe9);
    bytes.extend_from_slice(b",true\n");
    std::fs::write(&input, bytes).expect("write latin1 file");

    site_redirects()
        .args([
            "identify",
            "-i",
            input.to_str().unwrap(),
            "--input-encoding",
            "latin1",
        ])
        .assert()
        .success()
        .stdout(contains("\"/shipments/agl9\",\"/agroverse-shipments/agl9\""));
}

#[test]
fn crlf_manifest_with_blank_lines_matches_lf() {
    let workspace = TestWorkspace::new();
    let crlf = workspace.write(
        "crlf.csv",
        "\r\nshipment_contract_number,serialized\r\n\r\nSM5,true\r\n\r\n",
    );
    site_redirects()
        .args(["identify", "-i", crlf.to_str().unwrap()])
        .assert()
        .success()
        .stdout("\"old_url\",\"new_url\"\n\"/shipments/sm5\",\"/sunmint-tree-planting-pledges/sm5\"\n");
}
