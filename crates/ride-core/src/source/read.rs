use sha2::{Digest, Sha256};
use std::{fs, path::Path};

use crate::error::LoadError;
use crate::report::model::{SourceHash, SourceInfo};

/// Raw source context used during loading.
///
/// Holds the exact bytes parsed and a cryptographic fingerprint
/// that identifies the content independently of its path.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Source path (informational only).
    pub path: Option<String>,

    /// Exact bytes read from disk.
    pub bytes: Vec<u8>,

    pub size_bytes: u64,

    /// Hash algorithm used for fingerprinting.
    pub hash_alg: String,

    /// Hex-encoded hash of the source bytes.
    pub hash_hex: String,
}

impl SourceContext {
    /// Convert into report-facing source metadata, dropping the raw bytes.
    pub fn into_source_info(self) -> SourceInfo {
        SourceInfo {
            path: self.path,
            size_bytes: self.size_bytes,
            hash: SourceHash {
                algorithm: self.hash_alg,
                value: self.hash_hex,
            },
        }
    }
}

/// Read a CSV source and compute its content fingerprint.
///
/// The fingerprint depends only on the file bytes; timestamps and
/// permissions are ignored, so a touched-but-unchanged file keeps its key.
pub fn read_source(path: &Path) -> Result<SourceContext, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let digest = Sha256::digest(&bytes);

    Ok(SourceContext {
        path: Some(path.display().to_string()),
        size_bytes: bytes.len() as u64,
        bytes,
        hash_alg: "sha256".to_string(),
        hash_hex: hex::encode(digest),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_source(data: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_bytes_and_computes_stable_hash() {
        let data = b"id,mortos\n1,0\n";
        let file = temp_source(data);

        let ctx = read_source(file.path()).expect("source read succeeds");

        assert_eq!(ctx.bytes, data);
        assert_eq!(ctx.size_bytes, data.len() as u64);
        assert_eq!(ctx.hash_alg, "sha256");
        assert_eq!(ctx.hash_hex.len(), 64);

        let again = read_source(file.path()).unwrap();
        assert_eq!(ctx.hash_hex, again.hash_hex);
    }

    #[test]
    fn empty_input_has_the_well_known_digest() {
        let file = temp_source(b"");
        let ctx = read_source(file.path()).unwrap();

        assert_eq!(
            ctx.hash_hex,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn different_inputs_produce_different_hashes() {
        let a = read_source(temp_source(b"id\n1\n").path()).unwrap();
        let b = read_source(temp_source(b"id\n2\n").path()).unwrap();

        assert_ne!(a.hash_hex, b.hash_hex);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let result = read_source(Path::new("non_existent_acidentes.csv"));
        assert!(matches!(
            result,
            Err(LoadError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn converts_to_report_source_info() {
        let ctx = SourceContext {
            path: Some("acidentes.csv".into()),
            bytes: b"id\n".to_vec(),
            size_bytes: 3,
            hash_alg: "sha256".into(),
            hash_hex: "abcd".into(),
        };

        let info = ctx.into_source_info();
        assert_eq!(info.path, Some("acidentes.csv".into()));
        assert_eq!(info.size_bytes, 3);
        assert_eq!(info.hash.value, "abcd");
    }
}
