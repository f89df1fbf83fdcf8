//! Resource catalog: listed metadata and per-request content resolution.

pub mod catalog;

pub use catalog::{ContentSource, Resource, ResourceCatalog, ResourceContent, CONTENT_NOT_AVAILABLE};
