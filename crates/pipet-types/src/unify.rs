// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Instantiation of quantified functions and unification of types.

use std::collections::HashMap;

use crate::system::TypeSystem;
use crate::types::{Type, TypeId, TypeKind};

impl TypeSystem {
    /// Specialize a quantified function for one argument.
    ///
    /// The parameter of `fn_ty` is matched against `arg`, binding the
    /// quantified variables. Returns the function with bindings substituted,
    /// still quantified over whatever stayed unbound (plus any variables the
    /// argument's own quantifier brought along), or `None` if `arg` does not
    /// fit the parameter.
    pub(crate) fn instantiate(&mut self, fn_ty: TypeId, arg: TypeId) -> Option<TypeId> {
        let Type::Forall { vars, inner } = self.get(fn_ty).clone() else {
            return None;
        };
        if self.kind(inner) != TypeKind::Fn {
            return None;
        }
        let (vars, inner) = self.freshen(&vars, inner);
        let Type::Fn { from: param, .. } = *self.get(inner) else {
            return None;
        };
        let (arg, imported) = match self.get(arg).clone() {
            Type::Forall { vars, inner } => (inner, vars),
            _ => (arg, Vec::new()),
        };

        let mut subst = HashMap::new();
        if !self.match_pattern(param, arg, &vars, &mut subst) {
            tracing::trace!(
                param = self.render(param),
                arg = self.render(arg),
                "argument does not match parameter"
            );
            return None;
        }

        let instance = self.substitute(inner, &subst);
        let free = self.free_vars(instance);
        let mut remaining: Vec<TypeId> = vars
            .iter()
            .filter(|v| !subst.contains_key(v))
            .copied()
            .collect();
        for v in imported {
            if free.contains(&v) && !remaining.contains(&v) {
                remaining.push(v);
            }
        }
        remaining.sort_by_key(|v| free.iter().position(|f| f == v).unwrap_or(usize::MAX));

        let instance = if remaining.is_empty() {
            instance
        } else {
            self.make_forall(remaining, instance)
        };
        tracing::trace!(instance = self.render(instance), "instantiated");
        Some(instance)
    }

    /// One-sided matching: only variables in `bindable` may be bound, and
    /// only on the pattern side.
    fn match_pattern(
        &self,
        pattern: TypeId,
        ty: TypeId,
        bindable: &[TypeId],
        subst: &mut HashMap<TypeId, TypeId>,
    ) -> bool {
        if pattern == ty {
            return true;
        }
        if bindable.contains(&pattern) {
            return match subst.get(&pattern) {
                Some(&bound) => self.same_type(bound, ty),
                None => {
                    subst.insert(pattern, ty);
                    true
                }
            };
        }
        match (self.get(pattern), self.get(ty)) {
            (Type::Fn { from: pf, to: pt }, Type::Fn { from: tf, to: tt }) => {
                self.match_pattern(*pf, *tf, bindable, subst)
                    && self.match_pattern(*pt, *tt, bindable, subst)
            }
            (Type::List(pe), Type::List(te)) => self.match_pattern(*pe, *te, bindable, subst),
            (Type::Tuple(pc), Type::Tuple(tc)) => {
                pc.len() == tc.len()
                    && pc
                        .iter()
                        .zip(tc)
                        .all(|(&p, &t)| self.match_pattern(p, t, bindable, subst))
            }
            _ => self.same_type(pattern, ty),
        }
    }

    /// Structural equality where variables compare by identity. Never fails.
    pub(crate) fn same_type(&self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (Type::Fn { from: fa, to: ta }, Type::Fn { from: fb, to: tb }) => {
                self.same_type(*fa, *fb) && self.same_type(*ta, *tb)
            }
            (Type::List(ea), Type::List(eb)) => self.same_type(*ea, *eb),
            (Type::Tuple(ca), Type::Tuple(cb)) => {
                ca.len() == cb.len() && ca.iter().zip(cb).all(|(&x, &y)| self.same_type(x, y))
            }
            (
                Type::Forall { vars: va, inner: ia },
                Type::Forall { vars: vb, inner: ib },
            ) => va == vb && self.same_type(*ia, *ib),
            (Type::Var(_), _) | (_, Type::Var(_)) => false,
            (x, y) => x.kind() == y.kind(),
        }
    }

    /// Most general type both `left` and `right` are instances of, if any.
    ///
    /// Variables quantified at the top of either side may be bound; the
    /// result is quantified over those that stay free.
    pub fn can_unify(&mut self, left: TypeId, right: TypeId) -> Option<TypeId> {
        if left == right {
            return Some(left);
        }
        let mut bindable = Vec::new();
        let left = self.strip_quantifier(left, &mut bindable);
        let right = self.strip_quantifier(right, &mut bindable);

        let mut subst = HashMap::new();
        if !self.unify_step(left, right, &bindable, &mut subst) {
            tracing::trace!(
                left = self.render(left),
                right = self.render(right),
                "types do not unify"
            );
            return None;
        }

        // Bindings may refer to other bound variables; apply until stable.
        // The occurs check guarantees this terminates.
        let mut unified = left;
        loop {
            let next = self.substitute(unified, &subst);
            if next == unified {
                break;
            }
            unified = next;
        }

        let quantified: Vec<TypeId> = self
            .free_vars(unified)
            .into_iter()
            .filter(|v| bindable.contains(v))
            .collect();
        if quantified.is_empty() {
            Some(unified)
        } else {
            Some(self.make_forall(quantified, unified))
        }
    }

    /// Copy of `inner` with each of `vars` replaced by a new variable.
    ///
    /// Types derived from one quantified type share its variables, so they
    /// must be renamed before they can be bound independently.
    fn freshen(&mut self, vars: &[TypeId], inner: TypeId) -> (Vec<TypeId>, TypeId) {
        let fresh: Vec<TypeId> = vars.iter().map(|_| self.make_var()).collect();
        let rename: HashMap<TypeId, TypeId> = vars.iter().copied().zip(fresh.iter().copied()).collect();
        let inner = self.substitute(inner, &rename);
        (fresh, inner)
    }

    fn strip_quantifier(&mut self, id: TypeId, bindable: &mut Vec<TypeId>) -> TypeId {
        match self.get(id).clone() {
            Type::Forall { vars, inner } => {
                let (fresh, inner) = self.freshen(&vars, inner);
                bindable.extend(fresh);
                inner
            }
            _ => id,
        }
    }

    /// Follow variable bindings at the top of `id`.
    fn resolve(&self, mut id: TypeId, subst: &HashMap<TypeId, TypeId>) -> TypeId {
        while let Some(&next) = subst.get(&id) {
            id = next;
        }
        id
    }

    fn occurs(&self, var: TypeId, id: TypeId, subst: &HashMap<TypeId, TypeId>) -> bool {
        let id = self.resolve(id, subst);
        if id == var {
            return true;
        }
        match self.get(id) {
            Type::Fn { from, to } => self.occurs(var, *from, subst) || self.occurs(var, *to, subst),
            Type::List(elem) => self.occurs(var, *elem, subst),
            Type::Tuple(components) => components.iter().any(|&c| self.occurs(var, c, subst)),
            Type::Forall { inner, .. } => self.occurs(var, *inner, subst),
            _ => false,
        }
    }

    fn unify_step(
        &self,
        a: TypeId,
        b: TypeId,
        bindable: &[TypeId],
        subst: &mut HashMap<TypeId, TypeId>,
    ) -> bool {
        let a = self.resolve(a, subst);
        let b = self.resolve(b, subst);
        if a == b {
            return true;
        }
        if bindable.contains(&a) {
            if self.occurs(a, b, subst) {
                return false;
            }
            subst.insert(a, b);
            return true;
        }
        if bindable.contains(&b) {
            if self.occurs(b, a, subst) {
                return false;
            }
            subst.insert(b, a);
            return true;
        }
        match (self.get(a), self.get(b)) {
            (Type::Fn { from: fa, to: ta }, Type::Fn { from: fb, to: tb }) => {
                let (fa, ta, fb, tb) = (*fa, *ta, *fb, *tb);
                self.unify_step(fa, fb, bindable, subst) && self.unify_step(ta, tb, bindable, subst)
            }
            (Type::List(ea), Type::List(eb)) => {
                let (ea, eb) = (*ea, *eb);
                self.unify_step(ea, eb, bindable, subst)
            }
            (Type::Tuple(ca), Type::Tuple(cb)) => {
                ca.len() == cb.len()
                    && ca
                        .iter()
                        .zip(cb)
                        .all(|(&x, &y)| self.unify_step(x, y, bindable, subst))
            }
            _ => self.same_type(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_type;

    fn ty(ts: &mut TypeSystem, text: &str) -> TypeId {
        parse_type(ts, text).unwrap()
    }

    #[test]
    fn identity_instantiates_to_argument() {
        let mut ts = TypeSystem::new();
        let id = ty(&mut ts, "forall 'a. 'a -> 'a");
        let str_ = ts.str();
        let instance = ts.instantiate(id, str_).unwrap();
        assert_eq!(ts.render(instance), "Str -> Str");
    }

    #[test]
    fn element_of_list_parameter_is_bound() {
        let mut ts = TypeSystem::new();
        let head = ty(&mut ts, "forall 'a. ['a] -> 'a");
        let ints = ty(&mut ts, "[Int]");
        let instance = ts.instantiate(head, ints).unwrap();
        assert_eq!(ts.render(instance), "[Int] -> Int");

        let int = ts.int();
        assert_eq!(ts.instantiate(head, int), None);
    }

    #[test]
    fn unbound_variables_stay_quantified() {
        let mut ts = TypeSystem::new();
        let pair = ty(&mut ts, "forall 'a, 'b. 'a -> 'b -> ('a, 'b)");
        let int = ts.int();
        let instance = ts.instantiate(pair, int).unwrap();
        assert_eq!(ts.render(instance), "forall 'a. Int -> 'a -> (Int, 'a)");
    }

    #[test]
    fn instances_of_one_function_do_not_share_variables() {
        let mut ts = TypeSystem::new();
        let pair = ty(&mut ts, "forall 'a, 'b. 'a -> 'b -> ('a, 'b)");
        let int = ts.int();
        let partial = ts.instantiate(pair, int).unwrap();
        let partial = ts.result_of(partial).unwrap();
        assert_eq!(ts.render(partial), "forall 'a. 'a -> (Int, 'a)");

        let nested = ts.instantiate(pair, partial).unwrap();
        assert_eq!(
            ts.render(nested),
            "forall 'a, 'b. ('a -> (Int, 'a)) -> 'b -> ('a -> (Int, 'a), 'b)"
        );
        let Type::Forall { vars, .. } = ts.get(nested) else {
            panic!("expected a quantified instance");
        };
        assert_eq!(vars.len(), 2);
        assert_ne!(vars[0], vars[1]);
    }

    #[test]
    fn repeated_variable_must_bind_consistently() {
        let mut ts = TypeSystem::new();
        let same = ty(&mut ts, "forall 'a. ('a, 'a) -> 'a");
        let mixed = ty(&mut ts, "(Int, Str)");
        let uniform = ty(&mut ts, "(Int, Int)");
        assert_eq!(ts.instantiate(same, mixed), None);
        let instance = ts.instantiate(same, uniform).unwrap();
        assert_eq!(ts.render(instance), "(Int, Int) -> Int");
    }

    #[test]
    fn quantified_argument_carries_its_variables() {
        let mut ts = TypeSystem::new();
        let id = ty(&mut ts, "forall 'a. 'a -> 'a");
        let list = ty(&mut ts, "forall 'b. ['b]");
        let instance = ts.instantiate(id, list).unwrap();
        assert_eq!(ts.render(instance), "forall 'a. ['a] -> ['a]");
    }

    #[test]
    fn unification_of_concrete_types() {
        let mut ts = TypeSystem::new();
        let (int, str_) = (ts.int(), ts.str());
        assert_eq!(ts.can_unify(int, int), Some(int));
        assert_eq!(ts.can_unify(int, str_), None);

        let a = ty(&mut ts, "[Int]");
        let b = ty(&mut ts, "[Int]");
        let unified = ts.can_unify(a, b).unwrap();
        assert_eq!(ts.render(unified), "[Int]");
    }

    #[test]
    fn unification_binds_quantified_variables() {
        let mut ts = TypeSystem::new();
        let poly = ty(&mut ts, "forall 'a. ['a]");
        let ints = ty(&mut ts, "[Int]");
        let unified = ts.can_unify(poly, ints).unwrap();
        assert_eq!(ts.render(unified), "[Int]");

        let f = ty(&mut ts, "forall 'a, 'b. ('a, 'b) -> 'a");
        let g = ty(&mut ts, "forall 'c. ('c, Str) -> Int");
        let unified = ts.can_unify(f, g).unwrap();
        assert_eq!(ts.render(unified), "(Int, Str) -> Int");
    }

    #[test]
    fn unification_keeps_unconstrained_variables_general() {
        let mut ts = TypeSystem::new();
        let f = ty(&mut ts, "forall 'a. 'a -> 'a");
        let g = ty(&mut ts, "forall 'b. 'b -> 'b");
        let unified = ts.can_unify(f, g).unwrap();
        assert_eq!(ts.render(unified), "forall 'a. 'a -> 'a");
    }

    #[test]
    fn occurs_check_rejects_infinite_types() {
        let mut ts = TypeSystem::new();
        let f = ty(&mut ts, "forall 'a. 'a -> 'a");
        let g = ty(&mut ts, "forall 'b. ['b] -> 'b");
        assert_eq!(ts.can_unify(f, g), None);
    }
}
