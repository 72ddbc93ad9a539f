//! Type information values.
//!
//! Every value lives in a [`TypeArena`](crate::TypeArena) and is addressed by
//! a [`TypeInfoId`]. Primitives are per-arena singletons, unions and additive
//! types are hash-consed, and symbol types have identity semantics. All three
//! rules together make `TypeInfoId` equality the `equals` of the type algebra.

use jsinfer_common::DeclarationRef;
use smallvec::SmallVec;
use std::fmt;

/// Handle to a type information value in a [`TypeArena`](crate::TypeArena).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeInfoId(pub u32);

impl TypeInfoId {
    pub const BOOLEAN: TypeInfoId = TypeInfoId(0);
    pub const NUMBER: TypeInfoId = TypeInfoId(1);
    pub const STRING: TypeInfoId = TypeInfoId(2);
    /// `(number | string)`, the result of `+` when nothing is known.
    pub const STRING_OR_NUMBER: TypeInfoId = TypeInfoId(3);
}

impl fmt::Debug for TypeInfoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeInfoId::BOOLEAN => write!(f, "TypeInfoId(boolean)"),
            TypeInfoId::NUMBER => write!(f, "TypeInfoId(number)"),
            TypeInfoId::STRING => write!(f, "TypeInfoId(string)"),
            TypeInfoId::STRING_OR_NUMBER => write!(f, "TypeInfoId(number | string)"),
            TypeInfoId(id) => write!(f, "TypeInfoId({id})"),
        }
    }
}

/// The variant tag, also the seed of a compound type's hash code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TypeInfoKind {
    Primitive = 0,
    Union = 1,
    Additive = 2,
    Symbol = 3,
}

/// Constituents of a union or additive type, sorted by hash code.
pub type TypeList = SmallVec<[TypeInfoId; 4]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    Primitive(PrimitiveType),
    /// "Could be any of these."
    Union(TypeList),
    /// An unresolved `+` over its constituents, pending evaluation.
    Additive(TypeList),
    Symbol(SymbolType),
}

impl TypeData {
    pub fn kind(&self) -> TypeInfoKind {
        match self {
            TypeData::Primitive(_) => TypeInfoKind::Primitive,
            TypeData::Union(_) => TypeInfoKind::Union,
            TypeData::Additive(_) => TypeInfoKind::Additive,
            TypeData::Symbol(_) => TypeInfoKind::Symbol,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Number,
    String,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Number => "number",
            PrimitiveType::String => "string",
        }
    }
}

/// The lazily computed type of one declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolType {
    /// The declaration this type belongs to. Repointed when the declaration
    /// is matched to a new node across an edit.
    pub declaration: DeclarationRef,
    /// `None` until computed; `Some(None)` records "no information".
    pub memo: Option<Option<TypeInfoId>>,
}

impl SymbolType {
    #[inline]
    pub fn has_type(&self) -> bool {
        self.memo.is_some()
    }
}
