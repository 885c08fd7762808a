//! Service-account credentials for the document store.

use crate::error::StoreError;
use secrecy::Secret;
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the credential file.
pub const SERVICE_ACCOUNT_KEY_ENV: &str = "SERVICE_ACCOUNT_KEY";

/// Credential file looked up in the project root when nothing else is given.
pub const DEFAULT_KEY_PATH: &str = "serviceAccountKey.json";

/// Contents of the service-account key file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    /// MongoDB connection string, credentials included.
    pub uri: Secret<String>,
    pub database: String,
    #[serde(default)]
    pub app_name: Option<String>,
}

impl ServiceAccount {
    /// Read and parse the key file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::MissingKey);
        }

        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| StoreError::InvalidKey {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::path::PathBuf;

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("service-account-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_key_file_names_both_sources() {
        let err = ServiceAccount::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing service account key. Provide serviceAccountKey.json or set SERVICE_ACCOUNT_KEY."
        );
    }

    #[test]
    fn reads_connection_settings() {
        let path = temp_file(
            r#"{"uri":"mongodb://user:pw@localhost:27017","database":"savor","app_name":"seeder"}"#,
        );

        let account = ServiceAccount::from_file(&path).unwrap();
        assert_eq!(account.uri.expose_secret(), "mongodb://user:pw@localhost:27017");
        assert_eq!(account.database, "savor");
        assert_eq!(account.app_name.as_deref(), Some("seeder"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn malformed_key_file_names_its_path() {
        let path = temp_file("{ not json");

        let err = ServiceAccount::from_file(&path).unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));

        std::fs::remove_file(path).ok();
    }
}
