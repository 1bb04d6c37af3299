//! Flat-file JSON artifacts.
//!
//! Every stage output is persisted under one output directory with a fixed
//! file name, pretty-printed for the downstream dashboard. Theme-indexed
//! maps keep the declared theme order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

pub const LEXICAL_SCORES: &str = "lexical_scores.json";
pub const CLAIMS: &str = "claims.json";
pub const CLAIM_ASSERTIVENESS: &str = "claim_assertiveness.json";
pub const THEME_METRICS: &str = "theme_metrics.json";
pub const THEME_SUMMARIES: &str = "theme_summaries.json";
pub const THEME_SUMMARIES_WITH_SCORES: &str = "theme_summaries_with_scores.json";
pub const RUN_STATUS: &str = "run_status.json";
pub const SESSION_META: &str = "session_meta.json";
pub const COMPANY_DATA: &str = "company_data.json";

/// Read a JSON artifact from an arbitrary path.
pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Output directory holding one run's artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.path(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
        debug!(path = %path.display(), "artifact written");
        Ok(path)
    }

    pub fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        read_json_file(self.path(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Claim, ClaimType};

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("run").join("out");
        let store = ArtifactStore::new(&nested).unwrap();
        assert!(store.dir().is_dir());
        assert!(!store.exists(CLAIMS));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();
        let claims = vec![Claim {
            sentence: "We cut emissions 12%.".into(),
            confidence: 0.91,
            assertiveness_score: 0.746,
            claim_type: ClaimType::Performance,
        }];

        let path = store.write_json(CLAIMS, &claims).unwrap();
        assert_eq!(path, dir.path().join(CLAIMS));
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"assertiveness_score\": 0.746"));

        let back: Vec<Claim> = store.read_json(CLAIMS).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.read_json::<Vec<Claim>>(CLAIMS),
            Err(Error::Io { .. })
        ));

        fs::write(store.path(CLAIMS), "{\"not\": \"a list\"}").unwrap();
        assert!(matches!(
            store.read_json::<Vec<Claim>>(CLAIMS),
            Err(Error::Json(_))
        ));
    }
}
