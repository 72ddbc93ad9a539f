//! Type arena and hash-consing of compound types.
//!
//! The arena owns every [`TypeData`] of one engine. Primitives and symbol
//! types get an identity hash code from a per-arena counter; unions and
//! additive types hash by folding their constituents' hash codes and are
//! interned through a [`HashTable`], so two structurally equal compound types
//! always come back as the same [`TypeInfoId`].
//!
//! Compound construction follows one discipline for both kinds:
//! - flatten operands of the same kind into their constituents
//! - insert each constituent sorted by hash code, skipping duplicates
//! - keep the first [`MAX_COMPOUND_CONSTITUENTS`] of the sorted list

use crate::types::{PrimitiveType, SymbolType, TypeData, TypeInfoId, TypeInfoKind, TypeList};
use jsinfer_common::limits::MAX_COMPOUND_CONSTITUENTS;
use jsinfer_common::{DeclarationRef, HashTable, Hashable, compute_hash};
use tracing::trace;

#[derive(Clone, Debug)]
struct TypeEntry {
    data: TypeData,
    hash: i32,
}

/// Interning key of a union or additive type.
#[derive(Clone, Debug)]
struct CompoundKey {
    kind: TypeInfoKind,
    members: TypeList,
    hash: i32,
}

impl Hashable for CompoundKey {
    fn hash_code(&self) -> i32 {
        self.hash
    }

    // Constituents are canonical, so id equality is structural equality.
    fn equals(&self, other: &Self) -> bool {
        self.kind == other.kind && self.members == other.members
    }
}

#[derive(Debug)]
pub struct TypeArena {
    types: Vec<TypeEntry>,
    compounds: HashTable<CompoundKey, TypeInfoId>,
    next_identity_hash: i32,
}

impl Default for TypeArena {
    fn default() -> Self {
        TypeArena::new()
    }
}

impl TypeArena {
    pub fn new() -> TypeArena {
        let mut arena = TypeArena {
            types: Vec::new(),
            compounds: HashTable::new(),
            next_identity_hash: 1,
        };
        for primitive in [
            PrimitiveType::Boolean,
            PrimitiveType::Number,
            PrimitiveType::String,
        ] {
            let hash = arena.next_identity_hash();
            arena.push(TypeData::Primitive(primitive), hash);
        }
        let string_or_number = arena.union(Some(TypeInfoId::STRING), Some(TypeInfoId::NUMBER));
        debug_assert_eq!(string_or_number, Some(TypeInfoId::STRING_OR_NUMBER));
        arena
    }

    fn next_identity_hash(&mut self) -> i32 {
        let hash = self.next_identity_hash;
        self.next_identity_hash = hash.wrapping_add(1);
        hash
    }

    fn push(&mut self, data: TypeData, hash: i32) -> TypeInfoId {
        let id = TypeInfoId(self.types.len() as u32);
        self.types.push(TypeEntry { data, hash });
        id
    }

    /// Number of values allocated, symbols included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of distinct interned unions and additive types.
    pub fn interned_count(&self) -> usize {
        self.compounds.len()
    }

    #[inline]
    pub fn get(&self, id: TypeInfoId) -> Option<&TypeData> {
        self.types.get(id.0 as usize).map(|entry| &entry.data)
    }

    pub fn kind(&self, id: TypeInfoId) -> Option<TypeInfoKind> {
        self.get(id).map(TypeData::kind)
    }

    pub fn hash_code(&self, id: TypeInfoId) -> i32 {
        self.types.get(id.0 as usize).map_or(0, |entry| entry.hash)
    }

    /// Equality of the type algebra. Every value in the arena is canonical,
    /// so this is handle equality.
    #[inline]
    pub fn equals(&self, left: TypeInfoId, right: TypeInfoId) -> bool {
        left == right
    }

    /// Constituents of a union or additive type; empty for anything else.
    pub fn members(&self, id: TypeInfoId) -> &[TypeInfoId] {
        match self.get(id) {
            Some(TypeData::Union(members) | TypeData::Additive(members)) => members,
            _ => &[],
        }
    }

    // =========================================================================
    // Compound construction
    // =========================================================================

    /// Union of two optional types. An absent operand yields the other one.
    pub fn union(
        &mut self,
        left: Option<TypeInfoId>,
        right: Option<TypeInfoId>,
    ) -> Option<TypeInfoId> {
        let (left, right) = match (left, right) {
            (None, other) | (other, None) => return other,
            (Some(left), Some(right)) => (left, right),
        };
        if left == right {
            return Some(left);
        }

        let mut types = TypeList::new();
        self.decompose_union_into(Some(left), &mut types);
        self.decompose_union_into(Some(right), &mut types);
        debug_assert!(types.len() >= 2);
        self.union_from_types(types)
    }

    /// Build a union from an already flattened, sorted constituent list.
    /// Zero constituents is no information, one is that constituent.
    pub fn union_from_types(&mut self, mut types: TypeList) -> Option<TypeInfoId> {
        match types.len() {
            0 => return None,
            1 => return types.first().copied(),
            _ => {}
        }
        debug_assert!(
            types.iter().all(|&t| self.kind(t) != Some(TypeInfoKind::Union)),
            "unions never nest"
        );
        types.truncate(MAX_COMPOUND_CONSTITUENTS);
        Some(self.intern(TypeInfoKind::Union, types))
    }

    /// Deferred `left + right`. Absent operands are dropped; at least one
    /// operand must be present.
    pub fn plus(
        &mut self,
        left: Option<TypeInfoId>,
        right: Option<TypeInfoId>,
    ) -> Option<TypeInfoId> {
        debug_assert!(left.is_some() || right.is_some());
        let mut types = TypeList::new();
        self.decompose_plus_into(left, &mut types);
        self.decompose_plus_into(right, &mut types);
        if types.is_empty() {
            return None;
        }
        debug_assert!(
            types.iter().all(|&t| self.kind(t) != Some(TypeInfoKind::Additive)),
            "additive types never nest"
        );
        types.truncate(MAX_COMPOUND_CONSTITUENTS);
        Some(self.intern(TypeInfoKind::Additive, types))
    }

    /// Add `ty` (or its constituents, if it is a union) to a sorted set.
    pub fn decompose_union_into(&self, ty: Option<TypeInfoId>, set: &mut TypeList) {
        self.decompose_into(TypeInfoKind::Union, ty, set);
    }

    /// Add `ty` (or its constituents, if it is additive) to a sorted set.
    pub fn decompose_plus_into(&self, ty: Option<TypeInfoId>, set: &mut TypeList) {
        self.decompose_into(TypeInfoKind::Additive, ty, set);
    }

    fn decompose_into(&self, kind: TypeInfoKind, ty: Option<TypeInfoId>, set: &mut TypeList) {
        let Some(ty) = ty else {
            return;
        };
        if self.kind(ty) == Some(kind) {
            for &constituent in self.members(ty) {
                self.add_to_set(constituent, set);
            }
        } else {
            self.add_to_set(ty, set);
        }
    }

    /// Insert `ty` into `set`, keeping it sorted by hash code. Equal hash
    /// codes are told apart by equality; an equal element already present
    /// leaves the set unchanged.
    pub fn add_to_set(&self, ty: TypeInfoId, set: &mut TypeList) {
        let hash = self.hash_code(ty);
        for index in 0..set.len() {
            let current = set[index];
            let current_hash = self.hash_code(current);
            if current_hash < hash {
                continue;
            }
            if current_hash == hash {
                if self.equals(ty, current) {
                    return;
                }
                continue;
            }
            set.insert(index, ty);
            return;
        }
        set.push(ty);
    }

    fn intern(&mut self, kind: TypeInfoKind, members: TypeList) -> TypeInfoId {
        let hash = compute_hash(kind as i32, members.iter().map(|&m| self.hash_code(m)));
        let candidate = TypeInfoId(self.types.len() as u32);
        let key = CompoundKey {
            kind,
            members: members.clone(),
            hash,
        };
        let id = *self.compounds.get_or_add(key, candidate);
        if id == candidate {
            let data = match kind {
                TypeInfoKind::Additive => TypeData::Additive(members),
                _ => TypeData::Union(members),
            };
            self.types.push(TypeEntry { data, hash });
            trace!(?id, ?kind, hash, "interned compound type");
        }
        id
    }

    // =========================================================================
    // Symbol types
    // =========================================================================

    /// A fresh, uncomputed symbol type for `declaration`. Symbol types are
    /// never interned: each call yields a distinct value.
    pub fn create_symbol(&mut self, declaration: DeclarationRef) -> TypeInfoId {
        let hash = self.next_identity_hash();
        self.push(
            TypeData::Symbol(SymbolType {
                declaration,
                memo: None,
            }),
            hash,
        )
    }

    pub fn symbol(&self, id: TypeInfoId) -> Option<&SymbolType> {
        match self.get(id) {
            Some(TypeData::Symbol(symbol)) => Some(symbol),
            _ => None,
        }
    }

    fn symbol_mut(&mut self, id: TypeInfoId) -> Option<&mut SymbolType> {
        match self.types.get_mut(id.0 as usize).map(|entry| &mut entry.data) {
            Some(TypeData::Symbol(symbol)) => Some(symbol),
            _ => None,
        }
    }

    pub fn symbol_declaration(&self, id: TypeInfoId) -> Option<&DeclarationRef> {
        self.symbol(id).map(|symbol| &symbol.declaration)
    }

    /// Point a symbol type at the node its declaration now lives in.
    pub fn set_symbol_declaration(&mut self, id: TypeInfoId, declaration: DeclarationRef) {
        if let Some(symbol) = self.symbol_mut(id) {
            symbol.declaration = declaration;
        }
    }

    /// The memoized result: `None` if not computed, `Some(None)` if computed
    /// to no information.
    pub fn symbol_memo(&self, id: TypeInfoId) -> Option<Option<TypeInfoId>> {
        self.symbol(id).and_then(|symbol| symbol.memo)
    }

    pub fn set_symbol_memo(&mut self, id: TypeInfoId, ty: Option<TypeInfoId>) {
        if let Some(symbol) = self.symbol_mut(id) {
            symbol.memo = Some(ty);
        }
    }

    /// Drop the memoized result, forcing recomputation on next access.
    pub fn clear_symbol_type(&mut self, id: TypeInfoId) {
        if let Some(symbol) = self.symbol_mut(id) {
            symbol.memo = None;
        }
    }

    pub fn has_type(&self, id: TypeInfoId) -> bool {
        self.symbol(id).is_some_and(SymbolType::has_type)
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod intern_tests;
