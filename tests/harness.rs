//! Test harness for lsf integration tests

use std::fs::File;
use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

use chrono::{Local, TimeZone};

pub use lsf::test_utils::TestTree;

/// Run the lsf binary in `dir`, returning (stdout, stderr, exit code).
pub fn run_lsf(dir: &Path, args: &[&str]) -> (String, String, Option<i32>) {
    let binary = env!("CARGO_BIN_EXE_lsf");
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run lsf");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (stdout, stderr, output.status.code())
}

/// A local wall-clock time as a SystemTime.
pub fn local_time(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> SystemTime {
    Local
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("unambiguous local time")
        .into()
}

/// Set the modification time of a file or directory.
pub fn set_mtime(path: &Path, time: SystemTime) {
    let file = File::options()
        .read(true)
        .open(path)
        .expect("Failed to open for mtime");
    file.set_modified(time).expect("Failed to set mtime");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let tree = TestTree::new();
        assert!(tree.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let tree = TestTree::new();
        let file_path = tree.add_file("sub/test.txt", "content");
        assert!(file_path.exists());
        assert!(tree.path().join("sub").is_dir());
    }
}
