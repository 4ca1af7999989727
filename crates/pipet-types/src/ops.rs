// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Equality, kind queries and the function application rule.

use std::collections::HashMap;

use crate::config::QuantifierPolicy;
use crate::errors::MalformedType;
use crate::system::TypeSystem;
use crate::types::{Type, TypeId, TypeKind};

/// Outcome of applying a function to an argument through a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Application {
    pub result: TypeId,
    /// The function was mapped over the elements of a list argument.
    pub broadcast: bool,
}

impl TypeSystem {
    /// The body of an outer quantifier, or `id` itself.
    ///
    /// A quantified function is still logically a function. Do not use this
    /// when the quantifier structure itself is needed.
    pub(crate) fn see_through(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            Type::Forall { inner, .. } => *inner,
            _ => id,
        }
    }

    /// Whether `id` is logically of `kind`, looking through one quantifier.
    pub fn is_kind(&self, kind: TypeKind, id: TypeId) -> bool {
        self.kind(self.see_through(id)) == kind
    }

    pub fn is_invalid(&self, id: TypeId) -> bool {
        self.is_kind(TypeKind::Invalid, id)
    }

    pub fn is_fn(&self, id: TypeId) -> bool {
        self.is_kind(TypeKind::Fn, id)
    }

    pub fn is_list(&self, id: TypeId) -> bool {
        self.is_kind(TypeKind::List, id)
    }

    pub fn is_tuple(&self, id: TypeId) -> bool {
        self.is_kind(TypeKind::Tuple, id)
    }

    /// Element type if `id` is a list.
    pub fn list_elem(&self, id: TypeId) -> Option<TypeId> {
        match self.get(self.see_through(id)) {
            Type::List(elem) => Some(*elem),
            _ => None,
        }
    }

    /// Component types if `id` is a tuple.
    pub fn tuple_components(&self, id: TypeId) -> Option<&[TypeId]> {
        match self.get(self.see_through(id)) {
            Type::Tuple(components) => Some(components),
            _ => None,
        }
    }

    /// Structural equality.
    ///
    /// Identical ids are always equal. Comparing two distinct variables or
    /// two distinct quantifiers is an error: those need unification.
    pub fn equal(&self, a: TypeId, b: TypeId) -> Result<bool, MalformedType> {
        if a == b {
            return Ok(true);
        }
        match (self.get(a), self.get(b)) {
            (Type::Fn { from: fa, to: ta }, Type::Fn { from: fb, to: tb }) => {
                Ok(self.equal(*fa, *fb)? && self.equal(*ta, *tb)?)
            }
            (Type::List(ea), Type::List(eb)) => self.equal(*ea, *eb),
            (Type::Tuple(ca), Type::Tuple(cb)) => {
                if ca.len() != cb.len() {
                    return Ok(false);
                }
                for (&x, &y) in ca.iter().zip(cb) {
                    if !self.equal(x, y)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Type::Var(_), Type::Var(_)) => Err(MalformedType::VariableEquality {
                left: self.render(a).to_string(),
                right: self.render(b).to_string(),
            }),
            (Type::Forall { .. }, Type::Forall { .. }) => Err(MalformedType::QuantifierEquality {
                left: self.render(a).to_string(),
                right: self.render(b).to_string(),
            }),
            // Primitives are interned, so distinct ids mean distinct types.
            _ => Ok(false),
        }
    }

    /// Variables occurring free in `id`, in order of first occurrence.
    pub fn free_vars(&self, id: TypeId) -> Vec<TypeId> {
        let mut out = Vec::new();
        self.collect_free_vars(id, &mut Vec::new(), &mut out);
        out
    }

    fn collect_free_vars(&self, id: TypeId, bound: &mut Vec<TypeId>, out: &mut Vec<TypeId>) {
        match self.get(id) {
            Type::Var(_) => {
                if !bound.contains(&id) && !out.contains(&id) {
                    out.push(id);
                }
            }
            Type::Fn { from, to } => {
                self.collect_free_vars(*from, bound, out);
                self.collect_free_vars(*to, bound, out);
            }
            Type::List(elem) => self.collect_free_vars(*elem, bound, out),
            Type::Tuple(components) => {
                for &c in components {
                    self.collect_free_vars(c, bound, out);
                }
            }
            Type::Forall { vars, inner } => {
                let depth = bound.len();
                bound.extend(vars.iter().copied());
                self.collect_free_vars(*inner, bound, out);
                bound.truncate(depth);
            }
            Type::Unit
            | Type::Int
            | Type::Num
            | Type::Bool
            | Type::Str
            | Type::File
            | Type::Invalid => {}
        }
    }

    /// Replace variables according to `subst`. Replacements are not
    /// themselves substituted. Unchanged subtrees are shared, not copied.
    pub fn substitute(&mut self, id: TypeId, subst: &HashMap<TypeId, TypeId>) -> TypeId {
        if subst.is_empty() {
            return id;
        }
        match self.get(id).clone() {
            Type::Var(_) => subst.get(&id).copied().unwrap_or(id),
            Type::Fn { from, to } => {
                let new_from = self.substitute(from, subst);
                let new_to = self.substitute(to, subst);
                if new_from == from && new_to == to {
                    id
                } else {
                    self.make_fn(new_from, new_to)
                }
            }
            Type::List(elem) => {
                let new_elem = self.substitute(elem, subst);
                if new_elem == elem {
                    id
                } else {
                    self.make_list(new_elem)
                }
            }
            Type::Tuple(components) => {
                let new_components: Vec<TypeId> = components
                    .iter()
                    .map(|&c| self.substitute(c, subst))
                    .collect();
                if new_components == components {
                    id
                } else {
                    self.make_tuple(new_components)
                }
            }
            Type::Forall { vars, inner } => {
                // Variables bound here shadow the substitution.
                let new_inner = if vars.iter().any(|v| subst.contains_key(v)) {
                    let mut narrowed = subst.clone();
                    for v in &vars {
                        narrowed.remove(v);
                    }
                    self.substitute(inner, &narrowed)
                } else {
                    self.substitute(inner, subst)
                };
                if new_inner == inner {
                    id
                } else {
                    self.make_forall(vars, new_inner)
                }
            }
            Type::Unit
            | Type::Int
            | Type::Num
            | Type::Bool
            | Type::Str
            | Type::File
            | Type::Invalid => id,
        }
    }

    /// Parameter type of a (possibly quantified) function.
    pub fn param_of(&self, fn_ty: TypeId) -> Result<TypeId, MalformedType> {
        match self.get(self.see_through(fn_ty)) {
            Type::Fn { from, .. } => Ok(*from),
            _ => Err(MalformedType::NotAFunction {
                ty: self.render(fn_ty).to_string(),
            }),
        }
    }

    /// Result type of a function, keeping every bound variable of a
    /// quantified function.
    pub fn result_of(&mut self, fn_ty: TypeId) -> Result<TypeId, MalformedType> {
        self.result_of_with(fn_ty, QuantifierPolicy::KeepAll)
    }

    /// Result type of a function. For `forall vs. a -> b` the result is
    /// re-quantified: `forall vs. b` under [`QuantifierPolicy::KeepAll`], or
    /// over only the variables of `vs` free in `b` under
    /// [`QuantifierPolicy::Prune`] (no quantifier if none remain).
    pub fn result_of_with(
        &mut self,
        fn_ty: TypeId,
        policy: QuantifierPolicy,
    ) -> Result<TypeId, MalformedType> {
        match self.get(fn_ty).clone() {
            Type::Fn { to, .. } => Ok(to),
            Type::Forall { vars, inner } if self.kind(inner) == TypeKind::Fn => {
                let to = self.result_of_with(inner, policy)?;
                let vars = match policy {
                    QuantifierPolicy::KeepAll => vars,
                    QuantifierPolicy::Prune => {
                        let free = self.free_vars(to);
                        vars.into_iter().filter(|v| free.contains(v)).collect()
                    }
                };
                if vars.is_empty() {
                    Ok(to)
                } else {
                    Ok(self.make_forall(vars, to))
                }
            }
            _ => Err(MalformedType::NotAFunction {
                ty: self.render(fn_ty).to_string(),
            }),
        }
    }

    /// Direct or polymorphic application of `fn_ty` to `arg`.
    ///
    /// Returns `None` when `fn_ty` is not a function or its parameter does
    /// not accept `arg`.
    pub fn applies_to_fn(&mut self, arg: TypeId, fn_ty: TypeId) -> Result<Option<TypeId>, MalformedType> {
        self.applies_to_fn_with(arg, fn_ty, QuantifierPolicy::KeepAll)
    }

    pub fn applies_to_fn_with(
        &mut self,
        arg: TypeId,
        fn_ty: TypeId,
        policy: QuantifierPolicy,
    ) -> Result<Option<TypeId>, MalformedType> {
        match self.get(fn_ty).clone() {
            Type::Fn { from, .. } => {
                if self.equal(from, arg)? {
                    Ok(Some(self.result_of_with(fn_ty, policy)?))
                } else {
                    Ok(None)
                }
            }
            Type::Forall { inner, .. } if self.kind(inner) == TypeKind::Fn => {
                match self.instantiate(fn_ty, arg) {
                    Some(instance) => Ok(Some(self.result_of_with(instance, policy)?)),
                    None => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    /// The pipe application rule: direct application, then polymorphic
    /// application, then mapping the function over a list argument.
    ///
    /// Broadcasting is only tried after direct application fails, so a
    /// function that takes a list is never mapped over that list.
    pub fn apply_pipe(
        &mut self,
        arg: TypeId,
        fn_ty: TypeId,
        policy: QuantifierPolicy,
    ) -> Result<Option<Application>, MalformedType> {
        if let Some(result) = self.applies_to_fn_with(arg, fn_ty, policy)? {
            return Ok(Some(Application {
                result,
                broadcast: false,
            }));
        }

        let Some(elem) = self.list_elem(arg) else {
            return Ok(None);
        };
        // Keep the element under the list's quantifier, if any.
        let elem = match self.get(arg).clone() {
            Type::Forall { vars, .. } => self.make_forall(vars, elem),
            _ => elem,
        };
        match self.applies_to_fn_with(elem, fn_ty, policy)? {
            Some(result) => {
                let result = self.make_list(result);
                tracing::debug!(
                    arg = self.render(arg),
                    func = self.render(fn_ty),
                    "broadcasting over list"
                );
                Ok(Some(Application {
                    result,
                    broadcast: true,
                }))
            }
            None => Ok(None),
        }
    }

    /// Result of calling a function that takes `()` with no argument.
    pub fn unit_applies_to_fn(&self, fn_ty: TypeId) -> Option<TypeId> {
        match self.get(fn_ty) {
            Type::Fn { from, to } if self.kind(*from) == TypeKind::Unit => Some(*to),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly_identity(ts: &mut TypeSystem) -> TypeId {
        let a = ts.make_var();
        let f = ts.make_fn(a, a);
        ts.make_forall(vec![a], f)
    }

    #[test]
    fn equality_is_reflexive_for_every_kind() {
        let mut ts = TypeSystem::new();
        let int = ts.int();
        let list = ts.make_list(int);
        let tuple = ts.make_tuple(vec![int, list]);
        let func = ts.make_fn(tuple, int);
        let var = ts.make_var();
        let poly = poly_identity(&mut ts);

        for id in [int, list, tuple, func, var, poly, ts.invalid()] {
            assert_eq!(ts.equal(id, id), Ok(true));
        }
    }

    #[test]
    fn structural_equality_distinguishes_shapes() {
        let mut ts = TypeSystem::new();
        let (int, num, str_, bool_) = (ts.int(), ts.num(), ts.str(), ts.bool());

        let list_int = ts.make_list(int);
        let list_int2 = ts.make_list(int);
        let list_num = ts.make_list(num);
        assert_eq!(ts.equal(list_int, list_int2), Ok(true));
        assert_eq!(ts.equal(list_int, list_num), Ok(false));

        let is = ts.make_tuple(vec![int, str_]);
        let si = ts.make_tuple(vec![str_, int]);
        let is2 = ts.make_tuple(vec![int, str_]);
        let triple = ts.make_tuple(vec![int, str_, int]);
        assert_eq!(ts.equal(is, si), Ok(false));
        assert_eq!(ts.equal(si, is), Ok(false));
        assert_eq!(ts.equal(is, is2), Ok(true));
        assert_eq!(ts.equal(is, triple), Ok(false));

        let ib = ts.make_fn(int, bool_);
        let bi = ts.make_fn(bool_, int);
        assert_eq!(ts.equal(ib, bi), Ok(false));
        assert_eq!(ts.equal(list_int, is), Ok(false));
    }

    #[test]
    fn comparing_variables_is_malformed() {
        let mut ts = TypeSystem::new();
        let a = ts.make_var();
        let b = ts.make_var();
        assert!(matches!(
            ts.equal(a, b),
            Err(MalformedType::VariableEquality { .. })
        ));

        let p = poly_identity(&mut ts);
        let q = poly_identity(&mut ts);
        assert!(matches!(
            ts.equal(p, q),
            Err(MalformedType::QuantifierEquality { .. })
        ));
    }

    #[test]
    fn kind_queries_see_through_quantifiers() {
        let mut ts = TypeSystem::new();
        let poly = poly_identity(&mut ts);
        assert!(ts.is_fn(poly));
        assert!(!ts.is_list(poly));
        assert_eq!(ts.kind(poly), TypeKind::Forall);

        let a = ts.make_var();
        let list = ts.make_list(a);
        let poly_list = ts.make_forall(vec![a], list);
        assert_eq!(ts.list_elem(poly_list), Some(a));

        let int = ts.int();
        let pair = ts.make_tuple(vec![int, int]);
        assert_eq!(ts.tuple_components(pair), Some(&[int, int][..]));
        assert!(ts.is_tuple(pair));
        assert_eq!(ts.tuple_components(list), None);
    }

    #[test]
    fn direct_application() {
        let mut ts = TypeSystem::new();
        let (int, str_, bool_) = (ts.int(), ts.str(), ts.bool());
        let f = ts.make_fn(int, str_);

        assert_eq!(ts.applies_to_fn(int, f), Ok(Some(str_)));
        assert_eq!(ts.applies_to_fn(bool_, f), Ok(None));
        assert_eq!(ts.applies_to_fn(int, int), Ok(None));
    }

    #[test]
    fn polymorphic_application_instantiates() {
        let mut ts = TypeSystem::new();
        let id = poly_identity(&mut ts);
        let str_ = ts.str();
        assert_eq!(ts.applies_to_fn(str_, id), Ok(Some(str_)));
    }

    #[test]
    fn broadcast_is_a_fallback() {
        let mut ts = TypeSystem::new();
        let (int, str_) = (ts.int(), ts.str());
        let f = ts.make_fn(int, str_);
        let ints = ts.make_list(int);

        let app = ts.apply_pipe(ints, f, QuantifierPolicy::KeepAll).unwrap().unwrap();
        assert!(app.broadcast);
        assert_eq!(ts.render(app.result), "[Str]");

        let takes_list = ts.make_fn(ints, str_);
        let app = ts
            .apply_pipe(ints, takes_list, QuantifierPolicy::KeepAll)
            .unwrap()
            .unwrap();
        assert!(!app.broadcast);
        assert_eq!(app.result, str_);
    }

    #[test]
    fn broadcast_fails_when_elements_do_not_fit() {
        let mut ts = TypeSystem::new();
        let (int, str_, bool_) = (ts.int(), ts.str(), ts.bool());
        let f = ts.make_fn(int, str_);
        let bools = ts.make_list(bool_);
        assert_eq!(ts.apply_pipe(bools, f, QuantifierPolicy::KeepAll), Ok(None));
        assert_eq!(ts.apply_pipe(bool_, f, QuantifierPolicy::KeepAll), Ok(None));
    }

    #[test]
    fn result_of_quantified_function_keeps_or_prunes_variables() {
        let mut ts = TypeSystem::new();
        let a = ts.make_var();
        let int = ts.int();
        let f = ts.make_fn(a, int);
        let poly = ts.make_forall(vec![a], f);

        let kept = ts.result_of(poly).unwrap();
        assert_eq!(ts.render(kept), "forall 'a. Int");

        let pruned = ts.result_of_with(poly, QuantifierPolicy::Prune).unwrap();
        assert_eq!(pruned, int);
    }

    #[test]
    fn result_of_non_function_is_malformed() {
        let mut ts = TypeSystem::new();
        let int = ts.int();
        assert_eq!(
            ts.result_of(int),
            Err(MalformedType::NotAFunction { ty: "Int".to_string() })
        );
        assert!(ts.param_of(int).is_err());
    }

    #[test]
    fn free_vars_skip_bound_ones() {
        let mut ts = TypeSystem::new();
        let a = ts.make_var();
        let b = ts.make_var();
        let f = ts.make_fn(a, b);
        let inner = ts.make_forall(vec![a], f);
        let pair = ts.make_tuple(vec![b, inner, a]);
        assert_eq!(ts.free_vars(pair), vec![b, a]);
    }

    #[test]
    fn substitution_shares_unchanged_parts() {
        let mut ts = TypeSystem::new();
        let a = ts.make_var();
        let int = ts.int();
        let ints = ts.make_list(int);
        let f = ts.make_fn(ints, a);
        let file = ts.file();

        let subst = HashMap::from([(a, file)]);
        let g = ts.substitute(f, &subst);
        assert_eq!(ts.render(g), "[Int] -> File");
        let Type::Fn { from, .. } = ts.get(g) else {
            panic!("expected a function");
        };
        assert_eq!(*from, ints);
        assert_eq!(ts.substitute(ints, &subst), ints);
    }

    #[test]
    fn unit_application() {
        let mut ts = TypeSystem::new();
        let unit = ts.unit();
        let int = ts.int();
        let thunk = ts.make_fn(unit, int);
        let f = ts.make_fn(int, int);
        assert_eq!(ts.unit_applies_to_fn(thunk), Some(int));
        assert_eq!(ts.unit_applies_to_fn(f), None);
    }

    #[test]
    fn broadcast_over_quantified_list_keeps_its_variables() {
        let mut ts = TypeSystem::new();
        let first = crate::parse_type(&mut ts, "forall 'b. ('b, Int) -> 'b").unwrap();
        let pairs = crate::parse_type(&mut ts, "forall 'a. [('a, Int)]").unwrap();

        let app = ts
            .apply_pipe(pairs, first, QuantifierPolicy::KeepAll)
            .unwrap()
            .unwrap();
        assert!(app.broadcast);
        assert_eq!(ts.render(app.result), "['a]");

        let Some(elem) = ts.list_elem(app.result) else {
            panic!("expected a list");
        };
        assert!(matches!(ts.get(elem), Type::Forall { .. }));
    }
}
