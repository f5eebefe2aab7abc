use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(all(target_os = "windows", target_pointer_width = "64"))]
pub const MAKEMKVCON: &str = "makemkvcon64";

#[cfg(not(all(target_os = "windows", target_pointer_width = "64")))]
pub const MAKEMKVCON: &str = "makemkvcon";

/// General makemkvcon options, loadable from a JSON settings document.
/// Robot mode (`-r`) is always on since every service here parses it.
///
/// See https://www.makemkv.com/developers/usage.txt for what each one does.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MkvOptions {
    /// Program to run instead of `makemkvcon` from `PATH`.
    pub executable: Option<PathBuf>,
    pub messages: Option<String>,
    pub progress: Option<String>,
    pub debug: Option<String>,
    pub directio: Option<bool>,
    /// Read cache size in megabytes.
    pub cache: Option<u32>,
    /// Minimum title length in seconds.
    pub minlength: Option<u32>,
    pub noscan: bool,
    pub decrypt: bool,
}

impl MkvOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Options for a rip: progress goes to the same stream as messages so
    /// PRGT/PRGC/PRGV lines show up on stdout.
    pub fn with_progress(mut self) -> Self {
        self.progress = Some("-same".to_string());
        self
    }

    pub fn program(&self) -> PathBuf {
        self.executable
            .clone()
            .unwrap_or_else(|| PathBuf::from(MAKEMKVCON))
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-r".to_string()];
        if let Some(messages) = &self.messages {
            args.push(format!("--messages={messages}"));
        }
        if let Some(progress) = &self.progress {
            args.push(format!("--progress={progress}"));
        }
        if let Some(debug) = &self.debug {
            args.push(format!("--debug={debug}"));
        }
        if let Some(directio) = self.directio {
            args.push(format!("--directio={directio}"));
        }
        if let Some(cache) = self.cache {
            args.push(format!("--cache={cache}"));
        }
        if let Some(minlength) = self.minlength {
            args.push(format!("--minlength={minlength}"));
        }
        if self.noscan {
            args.push("--noscan".to_string());
        }
        if self.decrypt {
            args.push("--decrypt".to_string());
        }
        args
    }
}
