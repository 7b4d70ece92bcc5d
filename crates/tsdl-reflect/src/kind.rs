//! TypeDoc reflection kinds.
//!
//! Values match TypeDoc's `ReflectionKind` bit values, which is what the
//! JSON project format and the persisted mapping files carry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum ReflectionKind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    CallSignature,
    IndexSignature,
    ConstructorSignature,
    Parameter,
    TypeLiteral,
    TypeParameter,
    Accessor,
    GetSignature,
    SetSignature,
    TypeAlias,
    Reference,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown reflection kind {0:#x}")]
pub struct UnknownReflectionKind(pub u32);

impl ReflectionKind {
    pub const fn bits(self) -> u32 {
        match self {
            ReflectionKind::Project => 0x1,
            ReflectionKind::Module => 0x2,
            ReflectionKind::Namespace => 0x4,
            ReflectionKind::Enum => 0x8,
            ReflectionKind::EnumMember => 0x10,
            ReflectionKind::Variable => 0x20,
            ReflectionKind::Function => 0x40,
            ReflectionKind::Class => 0x80,
            ReflectionKind::Interface => 0x100,
            ReflectionKind::Constructor => 0x200,
            ReflectionKind::Property => 0x400,
            ReflectionKind::Method => 0x800,
            ReflectionKind::CallSignature => 0x1000,
            ReflectionKind::IndexSignature => 0x2000,
            ReflectionKind::ConstructorSignature => 0x4000,
            ReflectionKind::Parameter => 0x8000,
            ReflectionKind::TypeLiteral => 0x10000,
            ReflectionKind::TypeParameter => 0x20000,
            ReflectionKind::Accessor => 0x40000,
            ReflectionKind::GetSignature => 0x80000,
            ReflectionKind::SetSignature => 0x100000,
            ReflectionKind::TypeAlias => 0x200000,
            ReflectionKind::Reference => 0x400000,
            ReflectionKind::Document => 0x800000,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        let kind = match bits {
            0x1 => ReflectionKind::Project,
            0x2 => ReflectionKind::Module,
            0x4 => ReflectionKind::Namespace,
            0x8 => ReflectionKind::Enum,
            0x10 => ReflectionKind::EnumMember,
            0x20 => ReflectionKind::Variable,
            0x40 => ReflectionKind::Function,
            0x80 => ReflectionKind::Class,
            0x100 => ReflectionKind::Interface,
            0x200 => ReflectionKind::Constructor,
            0x400 => ReflectionKind::Property,
            0x800 => ReflectionKind::Method,
            0x1000 => ReflectionKind::CallSignature,
            0x2000 => ReflectionKind::IndexSignature,
            0x4000 => ReflectionKind::ConstructorSignature,
            0x8000 => ReflectionKind::Parameter,
            0x10000 => ReflectionKind::TypeLiteral,
            0x20000 => ReflectionKind::TypeParameter,
            0x40000 => ReflectionKind::Accessor,
            0x80000 => ReflectionKind::GetSignature,
            0x100000 => ReflectionKind::SetSignature,
            0x200000 => ReflectionKind::TypeAlias,
            0x400000 => ReflectionKind::Reference,
            0x800000 => ReflectionKind::Document,
            _ => return None,
        };
        Some(kind)
    }

    /// Kinds recorded in the reflection maps. Everything else is walked
    /// through but not registered.
    pub const fn is_registered(self) -> bool {
        matches!(
            self,
            ReflectionKind::Accessor
                | ReflectionKind::Class
                | ReflectionKind::Constructor
                | ReflectionKind::Enum
                | ReflectionKind::EnumMember
                | ReflectionKind::Function
                | ReflectionKind::Interface
                | ReflectionKind::Method
                | ReflectionKind::Namespace
                | ReflectionKind::Property
                | ReflectionKind::TypeAlias
                | ReflectionKind::TypeLiteral
                | ReflectionKind::TypeParameter
                | ReflectionKind::Variable
        )
    }

    /// Output directory of kinds that get their own page in the default theme.
    pub const fn page_dir(self) -> Option<&'static str> {
        match self {
            ReflectionKind::Class => Some("classes"),
            ReflectionKind::Interface => Some("interfaces"),
            ReflectionKind::Enum => Some("enums"),
            ReflectionKind::Namespace | ReflectionKind::Module => Some("modules"),
            ReflectionKind::TypeAlias => Some("types"),
            ReflectionKind::Function => Some("functions"),
            ReflectionKind::Variable => Some("variables"),
            _ => None,
        }
    }

    /// Whether children of this kind can own pages of their own.
    pub const fn is_page_container(self) -> bool {
        matches!(
            self,
            ReflectionKind::Project | ReflectionKind::Module | ReflectionKind::Namespace
        )
    }
}

impl From<ReflectionKind> for u32 {
    fn from(kind: ReflectionKind) -> u32 {
        kind.bits()
    }
}

impl TryFrom<u32> for ReflectionKind {
    type Error = UnknownReflectionKind;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        ReflectionKind::from_bits(bits).ok_or(UnknownReflectionKind(bits))
    }
}
