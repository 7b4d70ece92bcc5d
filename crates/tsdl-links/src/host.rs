//! Return conventions of the documentation host's unknown-symbol callback.

use crate::error::LinksError;

/// How a resolved link is handed back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostApi {
    /// The relative documentation URL as a plain string.
    PlainString,
    /// A `{target, caption}` object with an absolute target.
    Structured,
}

impl HostApi {
    /// Pick the convention from the host's version string, e.g. `0.25.13`
    /// or `0.26.0-beta.2`. Hosts from `0.24` on, and `0.23.26` and later
    /// patches, take structured results.
    pub fn detect(version: &str) -> Result<Self, LinksError> {
        let invalid = || LinksError::InvalidHostVersion(version.to_string());
        let components: Vec<&str> = version.split(['.', '-']).collect();
        let number = |index: usize| -> Result<u64, LinksError> {
            components
                .get(index)
                .and_then(|part| part.parse().ok())
                .ok_or_else(invalid)
        };
        let minor = number(1)?;
        let patch = number(2)?;
        if minor > 23 || patch >= 26 {
            Ok(HostApi::Structured)
        } else {
            Ok(HostApi::PlainString)
        }
    }
}
