//! Server certificate materialization
//!
//! Database drivers want a certificate *path*, but registered databases
//! store the PEM text inline. These helpers persist the text to a
//! content-addressed file and hand back the path; the same certificate
//! always maps to the same file, so repeated calls are cheap.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::EngineError;

const BEGIN_MARKER: &str = "-----BEGIN CERTIFICATE-----";
const END_MARKER: &str = "-----END CERTIFICATE-----";

/// Check that the input holds at least one well-formed PEM certificate block.
///
/// Accepts certificate chains (multiple blocks). Each body must decode as
/// base64; this does not verify the DER contents beyond that.
pub fn validate_pem(certificate: &str) -> Result<(), EngineError> {
    let mut rest = certificate;
    let mut blocks = 0;

    while let Some(start) = rest.find(BEGIN_MARKER) {
        let after = &rest[start + BEGIN_MARKER.len()..];
        let end = after.find(END_MARKER).ok_or_else(|| {
            EngineError::Certificate("unterminated PEM certificate block".to_string())
        })?;

        let encoded: String = after[..end].split_whitespace().collect();
        if encoded.is_empty() {
            return Err(EngineError::Certificate(
                "empty PEM certificate body".to_string(),
            ));
        }
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| EngineError::Certificate(format!("invalid PEM body: {e}")))?;

        blocks += 1;
        rest = &after[end + END_MARKER.len()..];
    }

    if blocks == 0 {
        return Err(EngineError::Certificate(
            "missing PEM certificate markers".to_string(),
        ));
    }
    Ok(())
}

/// Persist a certificate under `dir` and return its path.
///
/// The filename is the md5 of the certificate text, so identical
/// certificates share one file. Validation runs only before the first
/// write; an existing file short-circuits.
pub fn create_ssl_cert_file_in(dir: &Path, certificate: &str) -> Result<PathBuf, EngineError> {
    let digest = md5::compute(certificate.as_bytes());
    let path = dir.join(format!("{digest:x}.crt"));

    if !path.exists() {
        validate_pem(certificate)?;
        fs::write(&path, certificate)?;
        tracing::debug!(path = %path.display(), "Materialized server certificate");
    }
    Ok(path)
}

/// Persist a certificate in the system temp directory and return its path
pub fn create_ssl_cert_file(certificate: &str) -> Result<PathBuf, EngineError> {
    create_ssl_cert_file_in(&std::env::temp_dir(), certificate)
}
