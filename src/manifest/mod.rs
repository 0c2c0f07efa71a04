/// Local manifest handling: YAML documents and resource identity
pub mod codec;
pub mod resource;

pub use codec::{parse_documents, render_documents, Document};
pub use resource::{resolve_identity, ResourceIdentity, ResourceKind};
