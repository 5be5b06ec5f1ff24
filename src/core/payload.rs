//! Secret payload loading.
//!
//! The file is read as raw bytes and never parsed, even when it holds JSON.

use std::fmt;
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Raw secret bytes, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretPayload(Zeroizing<Vec<u8>>);

impl SecretPayload {
    /// Read the entire file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Payload` if the file is missing or unreadable.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::Payload {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), len = bytes.len(), "read secret payload");
        Ok(Self::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The payload as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SecretPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }
}

impl From<&str> for SecretPayload {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes().to_vec())
    }
}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretPayload([REDACTED; {} bytes])", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_keeps_bytes_verbatim() {
        let mut file = NamedTempFile::new().unwrap();
        let content = b"{\n  \"password\": \"s3cr3t\"\n}\n\n";
        file.write_all(content).unwrap();

        let payload = SecretPayload::read(file.path()).unwrap();
        assert_eq!(payload.as_bytes(), content);
        assert_eq!(payload.as_str(), Some("{\n  \"password\": \"s3cr3t\"\n}\n\n"));
    }

    #[test]
    fn test_read_does_not_require_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json at all {").unwrap();

        let payload = SecretPayload::read(file.path()).unwrap();
        assert_eq!(payload.as_str(), Some("not json at all {"));
    }

    #[test]
    fn test_non_utf8_has_no_str_view() {
        let payload = SecretPayload::from(vec![0xff, 0xfe, 0x00, 0x41]);
        assert_eq!(payload.as_str(), None);
        assert_eq!(payload.as_bytes(), &[0xff, 0xfe, 0x00, 0x41]);
    }

    #[test]
    fn test_missing_file_is_payload_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        match SecretPayload::read(&path) {
            Err(Error::Payload { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected payload error, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_is_redacted() {
        let payload = SecretPayload::from("s3cr3t");
        let shown = format!("{:?}", payload);
        assert!(!shown.contains("s3cr3t"));
        assert!(shown.contains("6 bytes"));
    }
}
