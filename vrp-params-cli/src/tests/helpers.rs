//! Test helpers for writing request files into scratch directories.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Temporary directory holding a `request.json` path that is not yet written.
pub(super) fn scratch_request() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let request_path = root.join("request.json");
    (tmp, request_path)
}

pub(super) const VALID_REQUEST: &[u8] = br#"{
  "vrp": {
    "vehicles": [{ "id": "v1", "cost_fixed": 10 }],
    "services": [{ "id": "s1", "activity": { "point_id": "p1", "duration": "00:10" } }]
  }
}"#;

pub(super) const INVALID_REQUEST: &[u8] = br#"{
  "vrp": {
    "vehicles": [{ "id": "v1" }, { "sequence_timewindows": [{ "day_index": 9 }] }]
  }
}"#;
