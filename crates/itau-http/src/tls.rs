//! Client certificate loading for mutual TLS.

use std::fs;
use std::path::Path;

use reqwest::{Certificate, Identity};

use itau_core::Result;
use itau_core::error::InvalidInputError;

/// Material needed to configure a mutual-TLS client.
pub(crate) struct ClientTls {
    /// Certificate and private key presented to the server.
    pub identity: Identity,
    /// The client certificate, also trusted as a root for the API's own chain.
    pub root: Certificate,
}

/// Load the PEM certificate and key a credential points at.
pub(crate) fn load(certificate_path: &Path, key_path: &Path) -> Result<ClientTls> {
    let certificate = read(certificate_path)?;
    let key = read(key_path)?;

    let mut bundle = certificate.clone();
    if !bundle.ends_with(b"\n") {
        bundle.push(b'\n');
    }
    bundle.extend_from_slice(&key);

    let identity = Identity::from_pem(&bundle).map_err(|e| InvalidInputError::Certificate {
        path: certificate_path.display().to_string(),
        reason: format!("invalid certificate or key: {}", e),
    })?;

    let root = Certificate::from_pem(&certificate).map_err(|e| InvalidInputError::Certificate {
        path: certificate_path.display().to_string(),
        reason: format!("invalid CA certificate: {}", e),
    })?;

    Ok(ClientTls { identity, root })
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        InvalidInputError::Certificate {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use itau_core::Error;
    use std::io::Write;

    const FIXTURE_CERT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/client.crt");
    const FIXTURE_KEY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/client.key");

    #[test]
    fn valid_pair_loads() {
        assert!(load(Path::new(FIXTURE_CERT), Path::new(FIXTURE_KEY)).is_ok());
    }

    #[test]
    fn pair_copied_to_temp_files_loads() {
        let mut cert = tempfile::NamedTempFile::new().unwrap();
        cert.write_all(&fs::read(FIXTURE_CERT).unwrap()).unwrap();
        let mut key = tempfile::NamedTempFile::new().unwrap();
        key.write_all(&fs::read(FIXTURE_KEY).unwrap()).unwrap();

        assert!(load(cert.path(), key.path()).is_ok());
    }

    #[test]
    fn missing_file_names_the_path() {
        let result = load(Path::new("/nonexistent/cert.pem"), Path::new("/nonexistent/key.pem"));
        match result {
            Err(Error::InvalidInput(InvalidInputError::Certificate { path, .. })) => {
                assert_eq!(path, "/nonexistent/cert.pem");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let mut cert = tempfile::NamedTempFile::new().unwrap();
        writeln!(cert, "this is not a certificate").unwrap();
        let mut key = tempfile::NamedTempFile::new().unwrap();
        writeln!(key, "nor is this a key").unwrap();

        let result = load(cert.path(), key.path());
        assert!(matches!(
            result,
            Err(Error::InvalidInput(InvalidInputError::Certificate { .. }))
        ));
    }
}
