//! Remote catalog loading
//!
//! Four documents are requested together; every status is checked before any
//! body is parsed, and the first failure aborts the whole load.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::Transport;
use crate::constants::{
    DEFAULT_BASE_URL, GRENADES_PATH, PRIMARIES_PATH, SECONDARIES_PATH, STRATAGEMS_PATH,
};
use crate::data::{Catalog, Item, StratagemGroups};

/// The four documents that make up a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogResource {
    Primaries,
    Secondaries,
    Grenades,
    Stratagems,
}

impl CatalogResource {
    pub const ALL: [Self; 4] = [
        Self::Primaries,
        Self::Secondaries,
        Self::Grenades,
        Self::Stratagems,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Primaries => "primaries",
            Self::Secondaries => "secondaries",
            Self::Grenades => "grenades",
            Self::Stratagems => "stratagems",
        }
    }
}

/// Where the catalog documents live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_primaries_path")]
    pub primaries: String,
    #[serde(default = "default_secondaries_path")]
    pub secondaries: String,
    #[serde(default = "default_grenades_path")]
    pub grenades: String,
    #[serde(default = "default_stratagems_path")]
    pub stratagems: String,
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            primaries: default_primaries_path(),
            secondaries: default_secondaries_path(),
            grenades: default_grenades_path(),
            stratagems: default_stratagems_path(),
        }
    }
}

impl CatalogSource {
    /// Default paths rooted at a different base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn path(&self, resource: CatalogResource) -> &str {
        match resource {
            CatalogResource::Primaries => &self.primaries,
            CatalogResource::Secondaries => &self.secondaries,
            CatalogResource::Grenades => &self.grenades,
            CatalogResource::Stratagems => &self.stratagems,
        }
    }

    #[must_use]
    pub fn url(&self, resource: CatalogResource) -> String {
        format!("{}{}", self.base_url, self.path(resource))
    }

    /// Image source for an item icon. Icons are published relative to the
    /// same base as the catalog documents.
    #[must_use]
    pub fn asset_url(&self, icon: &str) -> String {
        format!("{}{icon}", self.base_url)
    }
}

/// A fully-read HTTP response as seen by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to fetch {url} (HTTP {status})")]
    Fetch { url: String, status: u16 },
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Invalid catalog JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// URL of the document that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::Transport { url, .. } | Self::Parse { url, .. } => url,
        }
    }
}

/// Fetch and parse all four catalog documents.
///
/// # Errors
///
/// Returns [`CatalogError::Transport`] if any request fails outright,
/// [`CatalogError::Fetch`] if any response carries a non-success status and
/// [`CatalogError::Parse`] if any body is not the expected JSON shape.
pub async fn load_catalog<T>(transport: &T, source: &CatalogSource) -> Result<Catalog, CatalogError>
where
    T: Transport + ?Sized,
{
    let urls = CatalogResource::ALL.map(|resource| source.url(resource));
    let (primaries, secondaries, grenades, stratagems) = futures::join!(
        transport.get(&urls[0]),
        transport.get(&urls[1]),
        transport.get(&urls[2]),
        transport.get(&urls[3]),
    );

    let mut responses = Vec::with_capacity(urls.len());
    for (url, result) in urls.iter().zip([primaries, secondaries, grenades, stratagems]) {
        let response = result.map_err(|err| CatalogError::Transport {
            url: url.clone(),
            message: err.to_string(),
        })?;
        responses.push(response);
    }
    for (url, response) in urls.iter().zip(&responses) {
        if !response.is_success() {
            return Err(CatalogError::Fetch {
                url: url.clone(),
                status: response.status,
            });
        }
    }

    let primaries: Vec<Item> = parse_body(&urls[0], &responses[0])?;
    let secondaries: Vec<Item> = parse_body(&urls[1], &responses[1])?;
    let grenades: Vec<Item> = parse_body(&urls[2], &responses[2])?;
    let stratagem_groups: StratagemGroups = parse_body(&urls[3], &responses[3])?;

    Ok(Catalog::from_parts(
        primaries,
        secondaries,
        grenades,
        stratagem_groups,
    ))
}

fn parse_body<D: DeserializeOwned>(url: &str, response: &HttpResponse) -> Result<D, CatalogError> {
    serde_json::from_str(&response.body).map_err(|source| CatalogError::Parse {
        url: url.to_string(),
        source,
    })
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_primaries_path() -> String {
    PRIMARIES_PATH.to_string()
}

fn default_secondaries_path() -> String {
    SECONDARIES_PATH.to_string()
}

fn default_grenades_path() -> String {
    GRENADES_PATH.to_string()
}

fn default_stratagems_path() -> String {
    STRATAGEMS_PATH.to_string()
}
