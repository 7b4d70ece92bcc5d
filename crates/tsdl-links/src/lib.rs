//! Cross-reference resolution for a later documentation build.
//!
//! A host that meets a reference it cannot resolve (`Array`,
//! `Intl.Collator`, ...) hands it to `CrossReferenceResolver`, which looks
//! the dotted name up in the `reflection-mapping.json` written by
//! `tsdl-reflect` and answers in the host's return convention (`HostApi`).

pub mod error;
pub use error::LinksError;

pub mod host;
pub use host::HostApi;

pub mod resolver;
pub use resolver::{
    CrossReferenceResolver, ReferenceDescriptor, ResolutionStart, ResolveResult, ResolverOptions,
};
