#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Scratch data directory for one test
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_file(&self, rel_path: &str) -> std::io::Result<String> {
        fs::read_to_string(self.dir.path().join(rel_path))
    }

    pub fn read_json(&self, rel_path: &str) -> Result<Value, Box<dyn std::error::Error>> {
        Ok(serde_json::from_str(&self.read_file(rel_path)?)?)
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(".notebook.toml", contents)
    }

    /// The binary pointed at this directory
    pub fn cmd(&self) -> Command {
        let mut cmd = notebook_cmd();
        cmd.arg("--dir").arg(self.path());
        cmd
    }
}

pub fn notebook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notebook").expect("binary");
    cmd.env_remove("NOTEBOOK_DIR").env_remove("RUST_LOG");
    cmd
}

/// Parse the JSON envelope printed on stdout
pub fn envelope(output: &[u8]) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::from_slice(output)?)
}
