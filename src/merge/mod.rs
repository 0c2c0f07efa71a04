/// Cleaning and merging of manifest documents
pub mod clean;
pub mod containers;
pub mod deep;

pub use clean::clean;
pub use containers::merge_container_spec;
pub use deep::merge;
