use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A source makemkvcon can read from, rendered as `type:name` on its
/// command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Device {
    /// An ISO image file.
    Iso(PathBuf),
    /// A folder holding a disc backup or a mounted disc.
    File(PathBuf),
    /// A device node name under `/dev`, e.g. `sr0`.
    Dev(String),
    /// A drive by makemkvcon's own drive index.
    Disc(u32),
}

impl Device {
    pub fn kind(&self) -> &'static str {
        match self {
            Device::Iso(_) => "iso",
            Device::File(_) => "file",
            Device::Dev(_) => "dev",
            Device::Disc(_) => "disc",
        }
    }

    pub fn name(&self) -> String {
        match self {
            Device::Iso(path) | Device::File(path) => path.to_string_lossy().to_string(),
            Device::Dev(name) => format!("/dev/{name}"),
            Device::Disc(index) => index.to_string(),
        }
    }

    /// Whether the source is there to be read. Drive indexes are resolved by
    /// makemkvcon itself, so they always report available.
    pub fn available(&self) -> bool {
        match self {
            Device::Iso(path) => path.is_file(),
            Device::File(path) => path.is_dir(),
            Device::Dev(_) => PathBuf::from(self.name()).exists(),
            Device::Disc(_) => true,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Device::Disc(0).to_string(), "disc:0");
        assert_eq!(Device::Dev("sr0".to_string()).to_string(), "dev:/dev/sr0");
        assert_eq!(
            Device::Iso(PathBuf::from("/tmp/movie.iso")).to_string(),
            "iso:/tmp/movie.iso"
        );
        assert_eq!(
            Device::File(PathBuf::from("/media/MOVIE")).to_string(),
            "file:/media/MOVIE"
        );
    }

    #[test]
    fn test_available() {
        let dir = std::env::temp_dir();
        assert!(Device::File(dir.clone()).available());
        assert!(!Device::Iso(dir.clone()).available());
        assert!(!Device::File(dir.join("mkvrobot-missing-dir")).available());
        assert!(Device::Disc(3).available());
    }

    #[test]
    fn test_deserialize() {
        let device: Device = serde_json::from_str(r#"{"type":"disc","value":1}"#).unwrap();
        assert_eq!(device, Device::Disc(1));
    }
}
