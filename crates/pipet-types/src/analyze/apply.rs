// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Typing of pipe and juxtaposition applications.

use pipet_ast::{Expr, NodeId, Span};

use super::Analyzer;
use crate::env::SymbolEnv;
use crate::errors::{MalformedType, TypeError};
use crate::types::TypeId;

impl<E: SymbolEnv + ?Sized> Analyzer<'_, E> {
    /// `arg | func`: direct, then polymorphic, then broadcast application.
    pub(super) fn pipe(
        &mut self,
        node: NodeId,
        arg: &Expr,
        func: &Expr,
        span: Span,
    ) -> Result<TypeId, MalformedType> {
        let arg_ty = self.expr(arg)?;
        let fn_ty = self.expr(func)?;
        if self.ts.is_invalid(arg_ty) || self.ts.is_invalid(fn_ty) {
            return Ok(self.ts.invalid());
        }

        match self.ts.apply_pipe(arg_ty, fn_ty, self.config.quantifiers)? {
            Some(app) => {
                if app.broadcast {
                    self.broadcasts.insert(node);
                }
                Ok(app.result)
            }
            None => {
                self.mismatch(fn_ty, arg_ty, None, span)?;
                Ok(self.ts.invalid())
            }
        }
    }

    /// `a b f`: feed arguments to the function one at a time, left to right.
    /// Lists are never broadcast over here.
    pub(super) fn fn_app(
        &mut self,
        func: &Expr,
        args: &[Expr],
        span: Span,
    ) -> Result<TypeId, MalformedType> {
        let mut fn_ty = self.expr(func)?;
        let mut failed = self.ts.is_invalid(fn_ty);

        if args.is_empty() && !failed {
            return match self.ts.unit_applies_to_fn(fn_ty) {
                Some(result) => Ok(result),
                None => {
                    let unit = self.ts.unit();
                    self.mismatch(fn_ty, unit, None, span)?;
                    Ok(self.ts.invalid())
                }
            };
        }

        // Every argument is typed even after a failure so its own errors
        // are still reported.
        for (position, arg) in args.iter().enumerate() {
            let arg_ty = self.expr(arg)?;
            if failed {
                continue;
            }
            if self.ts.is_invalid(arg_ty) {
                failed = true;
                continue;
            }
            match self
                .ts
                .applies_to_fn_with(arg_ty, fn_ty, self.config.quantifiers)?
            {
                Some(result) => fn_ty = result,
                None => {
                    self.mismatch(fn_ty, arg_ty, Some(position), span)?;
                    failed = true;
                }
            }
        }

        if failed {
            Ok(self.ts.invalid())
        } else {
            Ok(fn_ty)
        }
    }

    fn mismatch(
        &mut self,
        fn_ty: TypeId,
        arg_ty: TypeId,
        position: Option<usize>,
        span: Span,
    ) -> Result<(), MalformedType> {
        let expected = if self.ts.is_fn(fn_ty) {
            let param = self.ts.param_of(fn_ty)?;
            Some(self.render(param))
        } else {
            None
        };
        let error = TypeError::ApplicationMismatch {
            function: self.render(fn_ty),
            argument: self.render(arg_ty),
            expected,
            position,
            span,
        };
        self.error(error);
        Ok(())
    }
}
