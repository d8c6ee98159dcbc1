use serde_yaml_ng::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use yadt_status::prelude::*;

/// Mock ServiceProbe for testing that records status checks
#[derive(Default, Clone)]
pub struct MockServiceProbe {
    codes: HashMap<PathBuf, i32>,
    extra_scripts: HashMap<PathBuf, Value>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockServiceProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, init_script: &str, code: i32) -> Self {
        self.codes.insert(PathBuf::from(init_script), code);
        self
    }

    pub fn with_extra_script(mut self, script: &str, output: Value) -> Self {
        self.extra_scripts.insert(PathBuf::from(script), output);
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ServiceProbe for MockServiceProbe {
    fn status_code(&self, status_command: Option<&str>, init_script: &Path) -> Result<i32> {
        let call = match status_command {
            Some(prefix) => format!("{} {} status", prefix, init_script.display()),
            None => format!("{} status", init_script.display()),
        };
        self.calls.lock().unwrap().push(call);

        self.codes
            .get(init_script)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No such file or directory"))
    }

    fn is_executable(&self, script: &Path) -> bool {
        self.extra_scripts.contains_key(script)
    }

    fn run_extra_script(&self, script: &Path) -> Result<Value> {
        self.extra_scripts
            .get(script)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("script not found: {}", script.display()))
    }
}
