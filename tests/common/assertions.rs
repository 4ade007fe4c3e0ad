//! Assertion helpers for generated headers.

use pretty_assertions::assert_eq;
use std::path::Path;

/// Extract the byte array entries from a generated header.
pub fn header_bytes(header: &str) -> Vec<u8> {
    let start = header.find("= {").expect("header has no array literal") + 3;
    let end = header[start..].find("};").expect("array literal not closed") + start;
    header[start..end]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let hex = s.strip_prefix("0x").expect("entry without 0x prefix");
            assert_eq!(hex.len(), 2, "entry '{s}' is not two hex digits");
            assert_eq!(hex, hex.to_uppercase(), "entry '{s}' is not uppercase");
            u8::from_str_radix(hex, 16).expect("entry is not hex")
        })
        .collect()
}

/// Assert the IMAGE_W / IMAGE_H constants.
pub fn assert_header_dims(header: &str, width: usize, height: usize) {
    assert!(
        header.contains(&format!("const uint16_t IMAGE_W = {width};")),
        "IMAGE_W is not {width}:\n{header}"
    );
    assert!(
        header.contains(&format!("const uint16_t IMAGE_H = {height};")),
        "IMAGE_H is not {height}:\n{header}"
    );
}

/// Assert every array line holds at most 16 entries and ends with a comma.
pub fn assert_array_layout(header: &str) {
    let start = header.find("= {\n").expect("header has no array literal") + 4;
    let end = header[start..].find("};").expect("array literal not closed") + start;
    for line in header[start..end].lines() {
        assert!(line.starts_with("  0x"), "bad array line '{line}'");
        assert!(line.ends_with(','), "missing trailing comma in '{line}'");
        assert!(line.matches("0x").count() <= 16, "more than 16 entries in '{line}'");
    }
}

/// Sorted file names in a directory.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("bad dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
