//! # PubChem PUG REST Client Module
//!
//! ## Aim
//! Resolves compound names and SMILES strings to a molecular formula through the
//! PubChem PUG REST service (https://pubchem.ncbi.nlm.nih.gov/rest/pug). This is
//! the fallback used for fragments that cannot be read as a formula.
//!
//! ## Main Data Structures and Logic
//! - `HttpClient`: trait over the HTTP transport, implemented for `reqwest::blocking::Client`
//!   and replaceable by canned responses in tests
//! - `CompoundLookup`: trait the fragment resolver talks to
//! - `PubChemClient<C>`: PUG REST implementation of `CompoundLookup`
//! - `CompoundRecord`: CID, molecular formula and link of the first hit
//!
//! ## Usage
//! ```rust, ignore
//! let client = PubChemClient::new(PUBCHEM_REST_URL, 10)?;
//! let record = client.lookup("carbamazepine", LookupMode::Name)?;
//! assert_eq!(record.cid, 2554);
//! ```
//!
//! Not found, HTTP errors and timeouts are all reported as `LookupError`; the
//! resolver treats every one of them as "try the next stage".
use log::{debug, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const PUBCHEM_REST_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
pub const PUBCHEM_COMPOUND_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/compound/";

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn get_text(&self, url: &str) -> Result<String, reqwest::Error>;
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        self.get(url).send()?.error_for_status()?.text()
    }
}

/// error types for compound lookups
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("compound not found")]
    NotFound,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// How a query string is interpreted by the lookup service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    Name,
    Smiles,
}

impl LookupMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupMode::Name => "name",
            LookupMode::Smiles => "smiles",
        }
    }

    pub fn alternate(&self) -> LookupMode {
        match self {
            LookupMode::Name => LookupMode::Smiles,
            LookupMode::Smiles => LookupMode::Name,
        }
    }
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// first compound returned for a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundRecord {
    pub cid: u64,
    pub molecular_formula: String,
    pub url: String,
}

impl CompoundRecord {
    pub fn new(cid: u64, molecular_formula: &str) -> Self {
        Self {
            cid,
            molecular_formula: molecular_formula.to_string(),
            url: format!("{}{}", PUBCHEM_COMPOUND_URL, cid),
        }
    }
}

/// External name/SMILES -> formula resolver
pub trait CompoundLookup {
    fn lookup(&self, query: &str, mode: LookupMode) -> Result<CompoundRecord, LookupError>;
}

#[derive(Debug, Deserialize)]
struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties")]
    properties: Vec<CompoundProperties>,
}

#[derive(Debug, Deserialize)]
struct CompoundProperties {
    #[serde(rename = "CID")]
    cid: u64,
    #[serde(rename = "MolecularFormula")]
    molecular_formula: Option<String>,
}

// {"Fault": {"Code": "PUGREST.NotFound", "Message": "No CID found", ...}}
#[derive(Debug, Deserialize)]
struct FaultResponse {
    #[serde(rename = "Fault")]
    fault: Fault,
}

#[derive(Debug, Deserialize)]
struct Fault {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message")]
    message: Option<String>,
}

pub struct PubChemClient<C: HttpClient> {
    client: C,
    base_url: String,
}

impl PubChemClient<Client> {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }
}

impl<C: HttpClient> PubChemClient<C> {
    pub fn with_client(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn http(&self) -> &C {
        &self.client
    }

    /// .../compound/name/<name>/property/MolecularFormula/JSON for names,
    /// .../compound/smiles/property/MolecularFormula/JSON?smiles=<q> for SMILES
    /// (SMILES may contain '/', which cannot go into a path segment).
    pub fn construct_url(&self, query: &str, mode: LookupMode) -> Result<Url, LookupError> {
        let mut url = Url::parse(&format!("{}/compound/", self.base_url))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| LookupError::InvalidResponse("base URL cannot be a base".into()))?;
            segments.pop_if_empty();
            match mode {
                LookupMode::Name => {
                    segments.push("name").push(query.trim());
                }
                LookupMode::Smiles => {
                    segments.push("smiles");
                }
            }
            segments.extend(["property", "MolecularFormula", "JSON"]);
        }
        if mode == LookupMode::Smiles {
            url.query_pairs_mut().append_pair("smiles", query.trim());
        }
        Ok(url)
    }

    pub fn parse_response(&self, body: &str) -> Result<CompoundRecord, LookupError> {
        if let Ok(fault) = serde_json::from_str::<FaultResponse>(body) {
            debug!("PubChem fault {}: {:?}", fault.fault.code, fault.fault.message);
            return if fault.fault.code.ends_with("NotFound") {
                Err(LookupError::NotFound)
            } else {
                Err(LookupError::InvalidResponse(fault.fault.code))
            };
        }
        let response: PropertyResponse = serde_json::from_str(body)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;
        let first = response
            .property_table
            .properties
            .into_iter()
            .next()
            .ok_or(LookupError::NotFound)?;
        let formula = first.molecular_formula.ok_or_else(|| {
            LookupError::InvalidResponse(format!("no molecular formula for CID {}", first.cid))
        })?;
        Ok(CompoundRecord::new(first.cid, &formula))
    }
}

impl<C: HttpClient> CompoundLookup for PubChemClient<C> {
    fn lookup(&self, query: &str, mode: LookupMode) -> Result<CompoundRecord, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::NotFound);
        }
        let url = self.construct_url(query, mode)?;
        debug!("PubChem query: {}", url);
        let body = self.client.get_text(url.as_str()).map_err(|e| {
            if e.status() == Some(reqwest::StatusCode::NOT_FOUND) {
                LookupError::NotFound
            } else {
                LookupError::NetworkError(e)
            }
        })?;
        let record = self.parse_response(&body)?;
        info!(
            "PubChem resolved '{}' ({}) as CID {} {}",
            query, mode, record.cid, record.molecular_formula
        );
        Ok(record)
    }
}
