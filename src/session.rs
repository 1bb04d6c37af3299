//! Session state and company profiles.
//!
//! Two small JSON records live next to the pipeline artifacts:
//!
//! - `session_meta.json` remembers the last analyzed company so a viewer can
//!   reopen the previous run;
//! - `company_data.json` maps company names to their published ESG profile,
//!   fetched through a [`CompanyProfileSource`]. The CLI `run --profiles`
//!   refreshes it from a [`ProfileTableSource`].

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CapabilityError, Error, Result};
use crate::pipeline::traits::CompanyProfileSource;

/// Placeholder used by profile sources for data they could not find.
pub const NOT_AVAILABLE: &str = "Not available";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

// ============================================================================
// SessionState
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub last_analyzed_company: Option<String>,
}

impl SessionState {
    pub fn for_company(company: impl Into<String>) -> Self {
        Self {
            last_analyzed_company: Some(company.into()),
        }
    }

    /// Read the session record. A missing file means no previous session.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), company = ?self.last_analyzed_company, "session saved");
        Ok(())
    }
}

// ============================================================================
// CompanyProfile
// ============================================================================

/// Reported emissions per scope, as free-form values with units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonFootprint {
    pub scope1: String,
    pub scope2: String,
    pub scope3: String,
    pub year: String,
}

impl Default for CarbonFootprint {
    fn default() -> Self {
        Self {
            scope1: not_available(),
            scope2: not_available(),
            scope3: not_available(),
            year: not_available(),
        }
    }
}

/// A company's published ESG profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    #[serde(rename = "ESG_rating")]
    pub esg_rating: String,
    #[serde(rename = "CDP_score")]
    pub cdp_score: String,
    pub carbon_footprint: CarbonFootprint,
    pub top3_commitments: Vec<String>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            esg_rating: not_available(),
            cdp_score: not_available(),
            carbon_footprint: CarbonFootprint::default(),
            top3_commitments: Vec::new(),
        }
    }
}

// ============================================================================
// ProfileStore
// ============================================================================

/// Company name -> profile, persisted as one JSON object.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored profile. A missing, unreadable or corrupt store reads as
    /// empty.
    pub fn load_all(&self) -> BTreeMap<String, CompanyProfile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "profile store unreadable; treating as empty");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "profile store corrupt; treating as empty");
            BTreeMap::new()
        })
    }

    pub fn get(&self, company: &str) -> Option<CompanyProfile> {
        self.load_all().remove(company)
    }

    /// Insert or replace one company's profile, keeping the others.
    pub fn upsert(&self, company: &str, profile: CompanyProfile) -> Result<()> {
        let mut profiles = self.load_all();
        profiles.insert(company.to_string(), profile);
        let json = serde_json::to_string_pretty(&profiles)?;
        fs::write(&self.path, json).map_err(|e| Error::io(&self.path, e))
    }
}

// ============================================================================
// ProfileTableSource
// ============================================================================

const PROFILE_CAPABILITY: &str = "company_profile_source";

/// Profile source backed by a `{company: profile}` JSON export.
#[derive(Debug, Clone, Default)]
pub struct ProfileTableSource {
    profiles: BTreeMap<String, CompanyProfile>,
}

impl ProfileTableSource {
    pub fn from_map(profiles: BTreeMap<String, CompanyProfile>) -> Self {
        Self { profiles }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_map(serde_json::from_str(&raw)?))
    }
}

impl CompanyProfileSource for ProfileTableSource {
    fn lookup(&self, company: &str) -> std::result::Result<CompanyProfile, CapabilityError> {
        self.profiles
            .get(company)
            .cloned()
            .ok_or_else(|| CapabilityError::failed(PROFILE_CAPABILITY, "no profile for company"))
    }
}

/// Fetch `company`'s profile and store it.
///
/// A failed lookup is logged and leaves the store untouched (`Ok(None)`);
/// only a failure to write the store is an error.
pub fn refresh_profile<S>(
    source: &S,
    store: &ProfileStore,
    company: &str,
) -> Result<Option<CompanyProfile>>
where
    S: CompanyProfileSource + ?Sized,
{
    match source.lookup(company) {
        Ok(profile) => {
            store.upsert(company, profile.clone())?;
            info!(company, path = %store.path().display(), "company profile stored");
            Ok(Some(profile))
        }
        Err(err) => {
            warn!(company, error = %err, code = err.code(), "company profile lookup failed");
            Ok(None)
        }
    }
}
