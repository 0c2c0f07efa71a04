/// Kubernetes cluster access
pub mod client;
pub mod fetcher;

pub use client::KubernetesClient;
pub use fetcher::ResourceFetcher;
