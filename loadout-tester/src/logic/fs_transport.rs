use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use loadout_core::{CatalogSource, HttpResponse, Transport, TransportError};

/// URL prefix the mirror answers to.
pub const MIRROR_BASE: &str = "mirror://";

/// Serves catalog documents from a directory laid out like the remote
/// database. Missing files answer 404.
#[derive(Debug, Clone)]
pub struct FsTransport {
    root: PathBuf,
}

impl FsTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Bundled fixture catalog shipped with the tester.
    pub fn bundled() -> Self {
        Self::new(default_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Catalog source whose URLs resolve against this mirror.
    pub fn source(&self) -> CatalogSource {
        CatalogSource::with_base_url(MIRROR_BASE)
    }

    fn resolve(&self, url: &str) -> Result<PathBuf, TransportError> {
        let relative = url
            .strip_prefix(MIRROR_BASE)
            .ok_or_else(|| TransportError(format!("{url} is not a mirror URL")))?;
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(TransportError(format!("{url} escapes the mirror root")));
        }
        Ok(self.root.join(relative))
    }
}

impl Transport for FsTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let path = self.resolve(url)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(HttpResponse::new(url, 200, body)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found in mirror", path.display());
                Ok(HttpResponse::new(url, 404, String::new()))
            }
            Err(err) => Err(TransportError(format!("{}: {err}", path.display()))),
        }
    }
}

pub fn default_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}
