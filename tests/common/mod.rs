//! In-process converter shared by the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use hwpx_batch::{ConvertError, DocumentConverter, Envelope};
use serde_json::Value;

/// One converter invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub output: PathBuf,
    pub envelope: Value,
}

/// Records every envelope and writes it to the output path, failing for
/// output file names listed in `fail_on`.
#[derive(Debug, Default)]
pub struct RecordingConverter {
    calls: Mutex<Vec<Call>>,
    fail_on: Vec<String>,
}

impl RecordingConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: names.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.envelope["data"]["article"]["atclId"].as_str().unwrap().to_string())
            .collect()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.output.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }
}

impl DocumentConverter for RecordingConverter {
    fn convert(&self, envelope: &Envelope, output: &Path) -> Result<(), ConvertError> {
        let value = envelope.to_value()?;
        self.calls.lock().unwrap().push(Call {
            output: output.to_path_buf(),
            envelope: value,
        });

        let name = output.file_name().unwrap().to_string_lossy();
        if self.fail_on.iter().any(|fail| *fail == name) {
            return Err(ConvertError::ExitStatus {
                code: Some(1),
                output: output.to_path_buf(),
            });
        }
        fs::write(output, envelope.to_json()?).unwrap();
        Ok(())
    }
}

/// Writes `records` as a JSON input file named `name` inside `dir`.
pub fn write_input(dir: &Path, name: &str, records: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec(records).unwrap()).unwrap();
    path
}
