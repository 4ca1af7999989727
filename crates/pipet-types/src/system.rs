// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The type arena.

use std::cell::OnceCell;

use crate::types::{Type, TypeId, TypeKind, TypeVarId};

/// A stored type and its memoized rendering.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) ty: Type,
    pub(crate) rendered: OnceCell<String>,
}

/// Owner of every type created during a compilation.
///
/// Types are never freed individually; dropping the system releases them
/// all. Primitive kinds are interned so that `TypeId` equality is type
/// equality for them. Structural types are never deduplicated.
#[derive(Debug, Default)]
pub struct TypeSystem {
    /// Singleton per unitary kind, created on first request.
    unitaries: [Option<TypeId>; TypeKind::UNITARY_COUNT],
    pub(crate) entries: Vec<Entry>,
    next_var: u32,
}

impl TypeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.entries.len() as u32);
        self.entries.push(Entry {
            ty,
            rendered: OnceCell::new(),
        });
        id
    }

    /// The canonical instance of a primitive kind.
    ///
    /// # Panics
    ///
    /// If `kind` is structural (function, list, tuple, variable, quantifier).
    pub fn unitary(&mut self, kind: TypeKind) -> TypeId {
        let index = match kind.unitary_index() {
            Some(index) => index,
            None => panic!("unitary() called with structural kind {:?}", kind),
        };
        if let Some(id) = self.unitaries[index] {
            return id;
        }
        let id = self.push(kind.unitary_type());
        self.unitaries[index] = Some(id);
        id
    }

    pub fn unit(&mut self) -> TypeId {
        self.unitary(TypeKind::Unit)
    }

    pub fn int(&mut self) -> TypeId {
        self.unitary(TypeKind::Int)
    }

    pub fn num(&mut self) -> TypeId {
        self.unitary(TypeKind::Num)
    }

    pub fn bool(&mut self) -> TypeId {
        self.unitary(TypeKind::Bool)
    }

    pub fn str(&mut self) -> TypeId {
        self.unitary(TypeKind::Str)
    }

    pub fn file(&mut self) -> TypeId {
        self.unitary(TypeKind::File)
    }

    /// Sentinel for expressions whose type could not be determined.
    pub fn invalid(&mut self) -> TypeId {
        self.unitary(TypeKind::Invalid)
    }

    pub fn make_fn(&mut self, from: TypeId, to: TypeId) -> TypeId {
        self.push(Type::Fn { from, to })
    }

    pub fn make_list(&mut self, elem: TypeId) -> TypeId {
        self.push(Type::List(elem))
    }

    pub fn make_tuple(&mut self, components: Vec<TypeId>) -> TypeId {
        self.push(Type::Tuple(components))
    }

    /// A fresh variable, distinct from every other.
    pub fn make_var(&mut self) -> TypeId {
        let var = TypeVarId(self.next_var);
        self.next_var += 1;
        self.push(Type::Var(var))
    }

    pub fn make_forall(&mut self, vars: Vec<TypeId>, inner: TypeId) -> TypeId {
        debug_assert!(
            vars.iter().all(|&v| matches!(self.get(v), Type::Var(_))),
            "quantifier over a non-variable"
        );
        self.push(Type::Forall { vars, inner })
    }

    /// Curried function type over primitive kinds: `[Int, Str, Bool]` gives
    /// `Int -> Str -> Bool`. A single kind is just that type; none is `()`.
    pub fn fn_chain(&mut self, kinds: &[TypeKind]) -> TypeId {
        let mut kinds = kinds.iter().rev();
        let mut result = match kinds.next() {
            Some(&last) => self.unitary(last),
            None => return self.unit(),
        };
        for &kind in kinds {
            let from = self.unitary(kind);
            result = self.make_fn(from, result);
        }
        result
    }

    pub fn tuple_chain(&mut self, components: &[TypeId]) -> TypeId {
        self.make_tuple(components.to_vec())
    }

    /// Look up a type.
    ///
    /// # Panics
    ///
    /// If `id` was not produced by this type system.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.entries[id.index()].ty
    }

    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.get(id).kind()
    }

    /// Number of types allocated so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
