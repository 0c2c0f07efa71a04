/// Lookup of live objects by identity
use async_trait::async_trait;

use crate::error::Result;
use crate::manifest::{Document, ResourceIdentity};

/// Source of online resources
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Read the live object named by `identity` as a YAML document
    async fn fetch(&self, identity: &ResourceIdentity) -> Result<Document>;
}
