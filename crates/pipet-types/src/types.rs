// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type definitions for the type system.

/// Handle to a type owned by a [`TypeSystem`](crate::TypeSystem).
///
/// Only meaningful for the type system that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a type variable, for debugging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeVarId(pub u32);

/// A type in Pipet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `()`
    Unit,
    Int,
    Num,
    Bool,
    Str,
    /// Path or file reference
    File,
    /// Error placeholder for recovery
    Invalid,
    /// `from -> to`
    Fn { from: TypeId, to: TypeId },
    /// `[elem]`
    List(TypeId),
    /// `(a, b, ...)`
    Tuple(Vec<TypeId>),
    /// Placeholder bound by a quantifier. Carries identity only.
    Var(TypeVarId),
    /// `forall vars. inner`. Every entry of `vars` is a `Var`.
    Forall { vars: Vec<TypeId>, inner: TypeId },
}

/// The tag of a [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Unit,
    Int,
    Num,
    Bool,
    Str,
    File,
    Invalid,
    Fn,
    List,
    Tuple,
    Var,
    Forall,
}

impl TypeKind {
    pub(crate) const UNITARY_COUNT: usize = 7;

    /// Index into the singleton table, `None` for structural kinds.
    pub(crate) fn unitary_index(self) -> Option<usize> {
        match self {
            TypeKind::Unit => Some(0),
            TypeKind::Int => Some(1),
            TypeKind::Num => Some(2),
            TypeKind::Bool => Some(3),
            TypeKind::Str => Some(4),
            TypeKind::File => Some(5),
            TypeKind::Invalid => Some(6),
            TypeKind::Fn
            | TypeKind::List
            | TypeKind::Tuple
            | TypeKind::Var
            | TypeKind::Forall => None,
        }
    }

    /// Primitive kinds have exactly one instance per type system.
    pub fn is_unitary(self) -> bool {
        self.unitary_index().is_some()
    }

    /// The value of a unitary kind. Panics for structural kinds.
    pub(crate) fn unitary_type(self) -> Type {
        match self {
            TypeKind::Unit => Type::Unit,
            TypeKind::Int => Type::Int,
            TypeKind::Num => Type::Num,
            TypeKind::Bool => Type::Bool,
            TypeKind::Str => Type::Str,
            TypeKind::File => Type::File,
            TypeKind::Invalid => Type::Invalid,
            other => panic!("{:?} is not a unitary type kind", other),
        }
    }
}

impl Type {
    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Unit => TypeKind::Unit,
            Type::Int => TypeKind::Int,
            Type::Num => TypeKind::Num,
            Type::Bool => TypeKind::Bool,
            Type::Str => TypeKind::Str,
            Type::File => TypeKind::File,
            Type::Invalid => TypeKind::Invalid,
            Type::Fn { .. } => TypeKind::Fn,
            Type::List(_) => TypeKind::List,
            Type::Tuple(_) => TypeKind::Tuple,
            Type::Var(_) => TypeKind::Var,
            Type::Forall { .. } => TypeKind::Forall,
        }
    }
}
