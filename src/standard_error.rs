use serde::{Deserialize, Serialize};

/// Error surfaced to callers of the makemkvcon services. Record-level parse
/// problems never become one of these; only process and I/O failures do.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StandardError {
    pub title: String,
    pub message: String,
}

impl StandardError {
    pub fn new(title: String, message: String) -> Self {
        Self { title, message }
    }

    pub fn process_failed(code: Option<i32>, stderr: &str) -> Self {
        let code = code.map_or_else(|| "signal".to_string(), |code| code.to_string());
        let message = match stderr.trim() {
            "" => format!("makemkvcon exited with {code}"),
            stderr => format!("makemkvcon exited with {code}: {stderr}"),
        };
        Self::new("makemkvcon failed".to_string(), message)
    }
}

impl std::fmt::Display for StandardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {}: {}", self.title, self.message)
    }
}

impl std::error::Error for StandardError {}

impl From<std::io::Error> for StandardError {
    fn from(error: std::io::Error) -> Self {
        Self::new("I/O error".to_string(), error.to_string())
    }
}

impl From<serde_json::Error> for StandardError {
    fn from(error: serde_json::Error) -> Self {
        Self::new("Invalid settings".to_string(), error.to_string())
    }
}
