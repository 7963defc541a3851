#![forbid(unsafe_code)]

//! Loading padgrid layouts from their declarative XML description.

pub mod catalog;
pub mod decoder;

pub use catalog::{Category, CatalogEntry, CatalogError, CatalogIssue, LayoutCatalog};
pub use decoder::{
    DecodeError, PendingDecode, decode, decode_file, decode_in_background, decode_or_default,
    decode_reader,
};
