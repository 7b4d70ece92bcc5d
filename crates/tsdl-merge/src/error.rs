use tsdl_common::UnsupportedKind;

/// Merge failures.
///
/// `UnknownFile` and `UnsupportedKind` are configuration errors and abort
/// the pass. `MissingVariableStatement` is a structural violation: it is
/// logged, the symbol is skipped and the error is kept in the report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("file `{file}` is not part of the loaded source set")]
    UnknownFile { file: String },

    #[error("variable `{name}` in `{file}` has no enclosing variable statement")]
    MissingVariableStatement { name: String, file: String },

    #[error(transparent)]
    UnsupportedKind(#[from] UnsupportedKind),
}
