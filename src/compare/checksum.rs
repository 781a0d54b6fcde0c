//! Content checksums for binary and file values.

use crate::error::StepError;
use crate::value::Value;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Digest algorithm used for checksums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    /// 128-bit MD5.
    #[default]
    Md5,
    Sha256,
}

/// Text encoding of a digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumEncoding {
    #[default]
    Hex,
    Base64,
}

/// ChecksumOptions selects how file-like values are digested before they
/// are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumOptions {
    pub algorithm: ChecksumAlgorithm,
    pub encoding: ChecksumEncoding,
}

impl ChecksumOptions {
    pub fn new(algorithm: ChecksumAlgorithm, encoding: ChecksumEncoding) -> Self {
        ChecksumOptions {
            algorithm,
            encoding,
        }
    }

    /// Digests and encodes raw bytes.
    pub fn digest(&self, bytes: &[u8]) -> String {
        let raw = match self.algorithm {
            ChecksumAlgorithm::Md5 => Md5::digest(bytes).to_vec(),
            ChecksumAlgorithm::Sha256 => Sha256::digest(bytes).to_vec(),
        };
        match self.encoding {
            ChecksumEncoding::Hex => hex::encode(raw),
            ChecksumEncoding::Base64 => BASE64.encode(raw),
        }
    }
}

/// Returns the checksum of a file-like value, or `None` for other values.
///
/// File handles are read synchronously; a read failure is returned as
/// [`StepError::Io`].
pub fn checksum(value: &Value, options: &ChecksumOptions) -> Result<Option<String>, StepError> {
    match value {
        Value::Bytes(bytes) => Ok(Some(options.digest(bytes))),
        Value::File(handle) => {
            let bytes = handle.read().map_err(|e| StepError::io(handle.path(), e))?;
            Ok(Some(options.digest(&bytes)))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FileHandle;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_is_md5_hex() {
        let options = ChecksumOptions::default();
        assert_eq!(options.digest(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(options.digest(b"hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_sha256_base64() {
        let options = ChecksumOptions::new(ChecksumAlgorithm::Sha256, ChecksumEncoding::Base64);
        assert_eq!(
            options.digest(b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn test_file_and_bytes_share_checksum() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        let options = ChecksumOptions::default();

        let from_file = checksum(&Value::File(FileHandle::new(file.path())), &options).unwrap();
        let from_bytes = checksum(&Value::Bytes(b"hello".to_vec()), &options).unwrap();
        assert_eq!(from_file, from_bytes);
    }

    #[test]
    fn test_missing_file() {
        let handle = FileHandle::new("/definitely/not/here.bin");
        let err = checksum(&Value::File(handle), &ChecksumOptions::default()).unwrap_err();
        assert!(matches!(err, StepError::Io { .. }));
    }

    #[test]
    fn test_options_from_json() {
        let options: ChecksumOptions = serde_json::from_str(r#"{"algorithm":"sha256"}"#).unwrap();
        assert_eq!(options.algorithm, ChecksumAlgorithm::Sha256);
        assert_eq!(options.encoding, ChecksumEncoding::Hex);
    }

    #[test]
    fn test_non_file_values_have_no_checksum() {
        let options = ChecksumOptions::default();
        assert_eq!(checksum(&Value::from("hello"), &options).unwrap(), None);
    }
}
