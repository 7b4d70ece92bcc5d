//! The closed enumeration of declaration kinds that take part in merging.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Syntactic kind of a tracked top-level declaration.
///
/// Anything outside this set (enums, `declare module "x"`, `declare global`,
/// imports) is rejected by the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    Class,
    Function,
    Interface,
    Namespace,
    TypeAlias,
    Variable,
}

impl DeclKind {
    /// All kinds, in emission order.
    pub const ALL: [DeclKind; 6] = [
        DeclKind::Class,
        DeclKind::Function,
        DeclKind::Interface,
        DeclKind::Namespace,
        DeclKind::TypeAlias,
        DeclKind::Variable,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Function => "function",
            DeclKind::Interface => "interface",
            DeclKind::Namespace => "namespace",
            DeclKind::TypeAlias => "type-alias",
            DeclKind::Variable => "variable",
        }
    }

    /// Prefix used for file-per-symbol output (`interface-Window.d.ts`).
    pub const fn file_prefix(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Function => "function",
            DeclKind::Interface => "interface",
            DeclKind::Namespace => "namespace",
            DeclKind::TypeAlias => "typealias",
            DeclKind::Variable => "variable",
        }
    }

    /// Human readable plural used in overviews.
    pub const fn plural_label(self) -> &'static str {
        match self {
            DeclKind::Class => "Classes",
            DeclKind::Function => "Functions",
            DeclKind::Interface => "Interfaces",
            DeclKind::Namespace => "Namespaces",
            DeclKind::TypeAlias => "Type Aliases",
            DeclKind::Variable => "Variables",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for kind names outside the fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported declaration kind: {0}")]
pub struct UnsupportedKind(pub String);

impl FromStr for DeclKind {
    type Err = UnsupportedKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(DeclKind::Class),
            "function" => Ok(DeclKind::Function),
            "interface" => Ok(DeclKind::Interface),
            "namespace" => Ok(DeclKind::Namespace),
            "type-alias" | "typealias" => Ok(DeclKind::TypeAlias),
            "variable" => Ok(DeclKind::Variable),
            other => Err(UnsupportedKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in DeclKind::ALL {
            assert_eq!(kind.as_str().parse::<DeclKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "enum".parse::<DeclKind>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported declaration kind: enum");
    }
}
