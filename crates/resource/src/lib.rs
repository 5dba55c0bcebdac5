//! Asset access for SmartSpend reports.

pub mod filesystem;
pub mod provider;
pub mod raster;

pub use filesystem::FilesystemResourceProvider;
pub use provider::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
pub use raster::{decode_image, to_encoded};
