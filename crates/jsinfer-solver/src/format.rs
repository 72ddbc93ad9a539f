//! Display of type information for hover text and test assertions.

use crate::intern::TypeArena;
use crate::types::{TypeData, TypeInfoId};
use std::fmt;

/// `Display` adapter for one type in an arena.
pub struct TypeDisplay<'a> {
    types: &'a TypeArena,
    id: TypeInfoId,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.types.get(self.id) {
            None => write!(f, "<unknown {}>", self.id.0),
            Some(TypeData::Primitive(primitive)) => f.write_str(primitive.name()),
            Some(TypeData::Union(members)) => self.write_list(f, members, " | "),
            Some(TypeData::Additive(members)) => self.write_list(f, members, " + "),
            Some(TypeData::Symbol(symbol)) => write!(
                f,
                "Symbol({},{})",
                self.types.hash_code(self.id),
                symbol.declaration.node
            ),
        }
    }
}

impl TypeDisplay<'_> {
    fn write_list(
        &self,
        f: &mut fmt::Formatter<'_>,
        members: &[TypeInfoId],
        separator: &str,
    ) -> fmt::Result {
        f.write_str("(")?;
        for (index, &member) in members.iter().enumerate() {
            if index > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{}", self.types.display(member))?;
        }
        f.write_str(")")
    }
}

impl TypeArena {
    pub fn display(&self, id: TypeInfoId) -> TypeDisplay<'_> {
        TypeDisplay { types: self, id }
    }

    /// Render an optional type; no information renders as `undefined`.
    pub fn format_type(&self, ty: Option<TypeInfoId>) -> String {
        match ty {
            Some(id) => self.display(id).to_string(),
            None => "undefined".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod format_tests;
