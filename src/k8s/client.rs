/// Kubernetes API access through kube-rs
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service};
use k8s_openapi::NamespaceResourceScope;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::fetcher::ResourceFetcher;
use crate::config::KubeSettings;
use crate::error::{Result, SyncError};
use crate::manifest::{Document, ResourceIdentity, ResourceKind};

/// Kubernetes client for reading live resources
#[derive(Clone)]
pub struct KubernetesClient {
    client: Client,
}

impl KubernetesClient {
    /// Build a client from kubeconfig settings
    ///
    /// Without an explicit kubeconfig or context the default discovery chain is
    /// used: `KUBECONFIG`, `~/.kube/config`, then the in-cluster service account.
    pub async fn connect(settings: &KubeSettings) -> Result<Self> {
        let mut config = Self::load_config(settings).await?;
        config.read_timeout = Some(Duration::from_secs(settings.timeout_secs));

        debug!("Using Kubernetes API server {}", config.cluster_url);

        let client = Client::try_from(config)
            .map_err(|e| SyncError::Client(format!("Failed to create Kubernetes client: {}", e)))?;

        Ok(Self { client })
    }

    async fn load_config(settings: &KubeSettings) -> Result<Config> {
        let options = KubeConfigOptions {
            context: settings.context.clone(),
            ..Default::default()
        };

        match &settings.kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    SyncError::Client(format!(
                        "Failed to read kubeconfig {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| SyncError::Client(format!("Invalid kubeconfig: {}", e)))
            }
            None if settings.context.is_some() => Config::from_kubeconfig(&options)
                .await
                .map_err(|e| SyncError::Client(format!("Invalid kubeconfig: {}", e))),
            None => Config::infer().await.map_err(|e| {
                SyncError::Client(format!("Failed to load Kubernetes configuration: {}", e))
            }),
        }
    }

    /// Read a namespaced object and convert it to a generic document
    async fn get_document<K>(&self, identity: &ResourceIdentity) -> Result<Document>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + Debug + DeserializeOwned + Serialize,
        <K as Resource>::DynamicType: Default,
    {
        debug!("GET {}", identity);

        let api: Api<K> = Api::namespaced(self.client.clone(), &identity.namespace);
        let object = api.get(&identity.name).await.map_err(|e| SyncError::Fetch {
            kind: identity.kind,
            namespace: identity.namespace.clone(),
            name: identity.name.clone(),
            source: Box::new(e),
        })?;

        serde_yaml::to_value(&object).map_err(|e| {
            SyncError::Codec(format!("Failed to convert {} to YAML: {}", identity, e))
        })
    }
}

#[async_trait]
impl ResourceFetcher for KubernetesClient {
    async fn fetch(&self, identity: &ResourceIdentity) -> Result<Document> {
        match identity.kind {
            ResourceKind::Service => self.get_document::<Service>(identity).await,
            ResourceKind::Deployment => self.get_document::<Deployment>(identity).await,
            ResourceKind::DaemonSet => self.get_document::<DaemonSet>(identity).await,
            ResourceKind::StatefulSet => self.get_document::<StatefulSet>(identity).await,
            ResourceKind::ConfigMap => self.get_document::<ConfigMap>(identity).await,
            ResourceKind::Secret => self.get_document::<Secret>(identity).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_kubeconfig_file() {
        let settings = KubeSettings {
            kubeconfig: Some("/nonexistent/kube-sync/kubeconfig".into()),
            ..KubeSettings::default()
        };

        let result = KubernetesClient::connect(&settings).await;
        match result {
            Err(SyncError::Client(msg)) => assert!(msg.contains("/nonexistent/kube-sync/kubeconfig")),
            Err(other) => panic!("unexpected error: {:?}", other),
            Ok(_) => panic!("connected without a kubeconfig"),
        }
    }
}
