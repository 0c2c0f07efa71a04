/// Configuration management for kube-sync
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main kube-sync configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Kubernetes API access
    #[serde(default)]
    pub kube: KubeSettings,
}

/// Kubernetes API access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubeSettings {
    /// Kubeconfig file to use instead of the default discovery chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context (defaults to the current context)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Read timeout for API requests, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for KubeSettings {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

const EXAMPLE_HEADER: &str = "\
# kube-sync configuration
#
# kube.kubeconfig: kubeconfig file (default: KUBECONFIG, ~/.kube/config, in-cluster)
# kube.context: kubeconfig context (default: current context)
# kube.timeout_secs: read timeout for API requests
";

impl SyncConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SyncConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` (or defaults), apply command-line overrides and validate
    /// the result once
    pub fn resolve<P: AsRef<Path>>(
        path: P,
        kubeconfig: Option<PathBuf>,
        context: Option<String>,
    ) -> anyhow::Result<Self> {
        let config = Self::load_or_default(path)?.with_overrides(kubeconfig, context);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, kubeconfig: Option<PathBuf>, context: Option<String>) -> Self {
        if kubeconfig.is_some() {
            self.kube.kubeconfig = kubeconfig;
        }
        if context.is_some() {
            self.kube.context = context;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.kube.timeout_secs == 0 {
            anyhow::bail!("kube.timeout_secs must be greater than zero");
        }

        if matches!(self.kube.context.as_deref(), Some("")) {
            anyhow::bail!("kube.context cannot be empty");
        }

        Ok(())
    }

    /// Example configuration as commented YAML
    pub fn example_yaml() -> anyhow::Result<String> {
        let yaml = serde_yaml::to_string(&Self::default())?;
        Ok(format!("{}{}", EXAMPLE_HEADER, yaml))
    }
}
