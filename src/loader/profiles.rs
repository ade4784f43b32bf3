use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use super::types::ProfileCatalog;
use crate::error::ProfileSourceError;

/// Field of the profile document that holds the catalog.
pub const PROFILES_KEY: &str = "career_profiles";

/// Load the career profile catalog from a JSON document.
///
/// # Errors
///
/// Returns a distinct error when:
/// - The file does not exist or cannot be read
/// - The file is empty
/// - The JSON is invalid, the root is not an object, or a display name is
///   not a string
/// - `career_profiles` is absent, `null`, or an empty object
pub fn load_profiles(path: &Path) -> Result<ProfileCatalog, ProfileSourceError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ProfileSourceError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ProfileSourceError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let catalog = parse_profiles(&content).map_err(|kind| kind.at(path))?;
    info!(count = catalog.len(), path = %path.display(), "loaded career profiles");
    Ok(catalog)
}

/// Reason a profile document was rejected, before a path is attached.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ProfileDocumentError {
    #[error("document is empty")]
    Empty,

    #[error("document is malformed: {0}")]
    Malformed(String),

    #[error("document has no '{}' field", PROFILES_KEY)]
    MissingKey,

    #[error("'{}' is empty", PROFILES_KEY)]
    NoProfiles,
}

impl ProfileDocumentError {
    fn at(self, path: &Path) -> ProfileSourceError {
        let path = path.to_path_buf();
        match self {
            ProfileDocumentError::Empty => ProfileSourceError::Empty { path },
            ProfileDocumentError::Malformed(message) => {
                ProfileSourceError::Malformed { path, message }
            }
            ProfileDocumentError::MissingKey => ProfileSourceError::MissingKey { path },
            ProfileDocumentError::NoProfiles => ProfileSourceError::NoProfiles { path },
        }
    }
}

/// Parse a profile document held in memory. Other top-level fields are ignored.
pub fn parse_profiles(content: &str) -> Result<ProfileCatalog, ProfileDocumentError> {
    if content.trim().is_empty() {
        return Err(ProfileDocumentError::Empty);
    }

    let document: Value = serde_json::from_str(content)
        .map_err(|e| ProfileDocumentError::Malformed(e.to_string()))?;

    let Value::Object(mut root) = document else {
        return Err(ProfileDocumentError::Malformed(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    let profiles = match root.remove(PROFILES_KEY) {
        None | Some(Value::Null) => return Err(ProfileDocumentError::MissingKey),
        Some(v) => v,
    };

    let catalog: ProfileCatalog = serde_json::from_value(profiles).map_err(|e| {
        ProfileDocumentError::Malformed(format!("'{}' must map ids to names: {}", PROFILES_KEY, e))
    })?;

    if catalog.is_empty() {
        return Err(ProfileDocumentError::NoProfiles);
    }

    Ok(catalog)
}
