// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Typing of symbols and literals.

use pipet_ast::{Expr, Span, SymbolId};

use super::Analyzer;
use crate::config::ListLiteralPolicy;
use crate::env::SymbolEnv;
use crate::errors::{MalformedType, TypeError};
use crate::types::TypeId;

impl<E: SymbolEnv + ?Sized> Analyzer<'_, E> {
    pub(super) fn symbol(&mut self, name: &str, symbol: Option<SymbolId>, span: Span) -> TypeId {
        if let Some(ty) = symbol.and_then(|id| self.env.symbol_type(id)) {
            return ty;
        }
        let name = match symbol {
            None if !name.is_empty() => name.to_string(),
            _ => self.env.symbol_name(symbol).to_string(),
        };
        self.error(TypeError::UntypedSymbol { name, span });
        self.ts.invalid()
    }

    pub(super) fn list(&mut self, items: &[Expr], span: Span) -> Result<TypeId, MalformedType> {
        if items.is_empty() {
            self.error(TypeError::EmptyListLiteral { span });
            return Ok(self.ts.invalid());
        }
        let mut types = Vec::with_capacity(items.len());
        for item in items {
            types.push(self.expr(item)?);
        }

        let elem = match self.config.list_literals {
            // TODO: make `Unify` the default once later phases report the
            // element mismatch instead of relying on the last element.
            ListLiteralPolicy::LastElement => types[types.len() - 1],
            ListLiteralPolicy::Unify => match self.unify_elements(items, &types) {
                Some(elem) => elem,
                None => return Ok(self.ts.invalid()),
            },
        };
        if self.ts.is_invalid(elem) {
            return Ok(self.ts.invalid());
        }
        Ok(self.ts.make_list(elem))
    }

    /// Common type of all valid elements. Reports the first element that
    /// does not agree with the ones before it.
    fn unify_elements(&mut self, items: &[Expr], types: &[TypeId]) -> Option<TypeId> {
        let mut common: Option<TypeId> = None;
        let mut saw_invalid = false;
        for (index, (&ty, item)) in types.iter().zip(items).enumerate() {
            if self.ts.is_invalid(ty) {
                saw_invalid = true;
                continue;
            }
            common = match common {
                None => Some(ty),
                Some(prev) => match self.ts.can_unify(prev, ty) {
                    Some(unified) => Some(unified),
                    None => {
                        let error = TypeError::ElementMismatch {
                            expected: self.render(prev),
                            found: self.render(ty),
                            index,
                            span: item.span,
                        };
                        self.error(error);
                        return None;
                    }
                },
            };
        }
        if saw_invalid {
            None
        } else {
            common
        }
    }

    pub(super) fn tuple(&mut self, items: &[Expr]) -> Result<TypeId, MalformedType> {
        let mut components = Vec::with_capacity(items.len());
        for item in items {
            components.push(self.expr(item)?);
        }
        if items.is_empty() {
            return Ok(self.ts.unit());
        }
        if components.iter().any(|&c| self.ts.is_invalid(c)) {
            return Ok(self.ts.invalid());
        }
        Ok(self.ts.make_tuple(components))
    }
}
