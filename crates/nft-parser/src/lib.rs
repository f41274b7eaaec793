//! Structural parsing of Sui object responses.
//!
//! Objects come back from a full node as generic Move payloads tagged with a
//! type descriptor. This crate recognises the descriptors of the NFT
//! protocol's types and lifts matching objects into the typed records of
//! [`nft_types`].
//!
//! Matching never fails loudly: an object of the wrong type, or a response
//! for a missing object, simply yields no record.

pub mod fields;
pub mod parser;
pub mod pattern;

pub use parser::{
    parse_object_owner, ArtNftParser, CertificateParser, CollectionParser, MarketParser,
    ObjectParser,
};
pub use pattern::{DescriptorKind, TypeDescriptor};
