/// Reconciliation of a local manifest with live cluster state
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, SyncError};
use crate::k8s::ResourceFetcher;
use crate::manifest::{parse_documents, render_documents, resolve_identity, Document};
use crate::merge::{clean, merge, merge_container_spec};

/// What to pull from the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Clean both sides and deep-merge the whole online object
    Resources,
    /// Only copy container image, env and command of workloads
    Containers,
}

/// Merges online resources into local manifest documents
pub struct ManifestSynchronizer<F> {
    fetcher: F,
}

impl<F: ResourceFetcher> ManifestSynchronizer<F> {
    /// Create a new synchronizer backed by `fetcher`
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Sync the manifest at `path` and return the rendered result.
    ///
    /// The file is rewritten once, after every document merged successfully;
    /// on any error, or with `dry_run`, it is left untouched.
    pub async fn sync_file(&self, path: &Path, mode: SyncMode, dry_run: bool) -> Result<String> {
        info!("Reading local resources from {}", path.display());

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SyncError::io(path, e))?;
        let local_resources = parse_documents(&text)?;

        let merged = self.sync_documents(local_resources, mode).await?;
        let rendered = render_documents(&merged)?;

        if dry_run {
            info!("Dry run, leaving {} unchanged", path.display());
        } else {
            tokio::fs::write(path, &rendered)
                .await
                .map_err(|e| SyncError::io(path, e))?;
            info!("Successfully updated local YAML: {}", path.display());
        }

        Ok(rendered)
    }

    /// Merge every document in order; the first failure aborts the run
    pub async fn sync_documents(&self, docs: Vec<Document>, mode: SyncMode) -> Result<Vec<Document>> {
        let mut merged = Vec::with_capacity(docs.len());

        for doc in docs {
            if doc.is_null() {
                debug!("Dropping empty document");
                continue;
            }

            let doc = match mode {
                SyncMode::Resources => self.merge_resource(doc).await?,
                SyncMode::Containers => self.merge_workload_containers(doc).await?,
            };
            merged.push(doc);
        }

        Ok(merged)
    }

    async fn merge_resource(&self, mut local: Document) -> Result<Document> {
        let identity = resolve_identity(&local)?;
        let mut online = self.fetcher.fetch(&identity).await?;

        clean(&mut local);
        clean(&mut online);
        merge(&mut local, online);

        info!(
            "Successfully merged resource: {} (Type: {})",
            identity.name, identity.kind
        );
        Ok(local)
    }

    async fn merge_workload_containers(&self, mut local: Document) -> Result<Document> {
        let identity = match resolve_identity(&local) {
            Ok(identity) => identity,
            Err(SyncError::UnsupportedKind { kind }) => {
                debug!("Keeping {} resource unchanged", kind);
                return Ok(local);
            }
            Err(e) => return Err(e),
        };

        if !identity.kind.is_workload() {
            debug!("Keeping {} unchanged", identity);
            return Ok(local);
        }

        info!(
            "Processing resource: {} (Type: {})",
            identity.name, identity.kind
        );

        let mut online = self.fetcher.fetch(&identity).await?;
        clean(&mut online);

        let updated = merge_container_spec(&online, &mut local);
        debug!("Updated {} container(s) of {}", updated, identity);

        info!(
            "Successfully merged resource: {} (Type: {})",
            identity.name, identity.kind
        );
        Ok(local)
    }
}
