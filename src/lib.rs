//! tsdl: merged, cross-linked documentation data for the TypeScript
//! standard library declarations.
//!
//! Two independent passes:
//! - declaration merging (`parser` + `merge`): many overlapping lib
//!   `.d.ts` files in, one consolidated declaration per symbol out
//! - link data (`reflect` + `links`): reflection maps with compatibility
//!   and handbook links, persisted for cross-reference resolution in a
//!   later documentation build

pub use tsdl_common as common;
pub use tsdl_links as links;
pub use tsdl_merge as merge;
pub use tsdl_parser as parser;
pub use tsdl_reflect as reflect;

pub use tsdl_common::{DeclKind, QualifiedName};

pub mod tracing_config;
