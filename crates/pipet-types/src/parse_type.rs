// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type notation parser.
//!
//! Accepts the notation types render to: `Int`, `Num`, `Bool`, `Str`,
//! `File`, `()`, `'a`, `[T]`, `(T, U)`, `T -> U` (right associative) and
//! `forall 'a, 'b. T`. Variables not bound by any `forall` are quantified at
//! the top level in order of first appearance, so `'a -> 'a` means
//! `forall 'a. 'a -> 'a`.

use crate::system::TypeSystem;
use crate::types::{Type, TypeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTypeError {
    #[error("unexpected end of type")]
    UnexpectedEnd,
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("unknown type `{name}` at offset {offset}")]
    UnknownType { name: String, offset: usize },
    #[error("expected {expected} at offset {offset}")]
    Expected { expected: &'static str, offset: usize },
    #[error("unexpected input after type at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Parse a type written in rendering notation.
pub fn parse_type(ts: &mut TypeSystem, text: &str) -> Result<TypeId, ParseTypeError> {
    let mut parser = Parser {
        ts,
        src: text,
        pos: 0,
        scopes: Vec::new(),
        free: Vec::new(),
    };
    let ty = parser.parse_type()?;
    parser.skip_ws();
    if parser.pos < text.len() {
        return Err(ParseTypeError::TrailingInput { offset: parser.pos });
    }
    Ok(parser.generalize(ty))
}

struct Parser<'a> {
    ts: &'a mut TypeSystem,
    src: &'a str,
    pos: usize,
    /// Variables bound by enclosing quantifiers, innermost last.
    scopes: Vec<(String, TypeId)>,
    /// Variables used without a binder.
    free: Vec<(String, TypeId)>,
}

impl<'a> Parser<'a> {
    fn generalize(&mut self, ty: TypeId) -> TypeId {
        if self.free.is_empty() {
            return ty;
        }
        let free = self.free.iter().map(|(_, v)| *v);
        let (vars, inner): (Vec<TypeId>, TypeId) = match self.ts.get(ty).clone() {
            Type::Forall { vars: bound, inner } => (bound.into_iter().chain(free).collect(), inner),
            _ => (free.collect(), ty),
        };
        self.ts.make_forall(vars, inner)
    }

    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &'static str) -> Result<(), ParseTypeError> {
        if self.eat(token) {
            Ok(())
        } else if self.pos >= self.src.len() {
            Err(ParseTypeError::UnexpectedEnd)
        } else {
            Err(ParseTypeError::Expected {
                expected: token,
                offset: self.pos,
            })
        }
    }

    fn ident(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn parse_type(&mut self) -> Result<TypeId, ParseTypeError> {
        self.skip_ws();
        if self.rest().starts_with("forall")
            && !self.rest()[6..].starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 6;
            return self.parse_forall();
        }
        let from = self.parse_atom()?;
        if self.eat("->") {
            let to = self.parse_type()?;
            Ok(self.ts.make_fn(from, to))
        } else {
            Ok(from)
        }
    }

    fn parse_forall(&mut self) -> Result<TypeId, ParseTypeError> {
        let depth = self.scopes.len();
        let mut vars = Vec::new();
        loop {
            self.skip_ws();
            let name = self.var_name()?;
            let var = self.ts.make_var();
            self.scopes.push((name.to_string(), var));
            vars.push(var);
            if !self.eat(",") {
                break;
            }
        }
        self.expect(".")?;
        let inner = self.parse_type()?;
        self.scopes.truncate(depth);
        Ok(self.ts.make_forall(vars, inner))
    }

    fn var_name(&mut self) -> Result<&'a str, ParseTypeError> {
        let start = self.pos;
        if !self.rest().starts_with('\'') {
            return match self.peek() {
                Some(_) => Err(ParseTypeError::Expected {
                    expected: "type variable",
                    offset: start,
                }),
                None => Err(ParseTypeError::UnexpectedEnd),
            };
        }
        self.pos += 1;
        if self.ident().is_empty() {
            return Err(ParseTypeError::Expected {
                expected: "type variable name",
                offset: self.pos,
            });
        }
        let src = self.src;
        Ok(&src[start..self.pos])
    }

    fn lookup_var(&mut self, name: &str) -> TypeId {
        if let Some((_, var)) = self.scopes.iter().rev().find(|(n, _)| n == name) {
            return *var;
        }
        if let Some((_, var)) = self.free.iter().find(|(n, _)| n == name) {
            return *var;
        }
        let var = self.ts.make_var();
        self.free.push((name.to_string(), var));
        var
    }

    fn parse_atom(&mut self) -> Result<TypeId, ParseTypeError> {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            None => Err(ParseTypeError::UnexpectedEnd),
            Some('\'') => {
                let name = self.var_name()?;
                Ok(self.lookup_var(name))
            }
            Some('[') => {
                self.pos += 1;
                let elem = self.parse_type()?;
                self.expect("]")?;
                Ok(self.ts.make_list(elem))
            }
            Some('(') => {
                self.pos += 1;
                if self.eat(")") {
                    return Ok(self.ts.unit());
                }
                let first = self.parse_type()?;
                if self.eat(")") {
                    return Ok(first);
                }
                let mut components = vec![first];
                while self.eat(",") {
                    components.push(self.parse_type()?);
                }
                self.expect(")")?;
                Ok(self.ts.make_tuple(components))
            }
            Some('<') => {
                if self.eat("<invalid>") {
                    Ok(self.ts.invalid())
                } else {
                    Err(ParseTypeError::UnexpectedChar { ch: '<', offset: start })
                }
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let name = self.ident();
                match name {
                    "Int" => Ok(self.ts.int()),
                    "Num" => Ok(self.ts.num()),
                    "Bool" => Ok(self.ts.bool()),
                    "Str" => Ok(self.ts.str()),
                    "File" => Ok(self.ts.file()),
                    _ => Err(ParseTypeError::UnknownType {
                        name: name.to_string(),
                        offset: start,
                    }),
                }
            }
            Some(ch) => Err(ParseTypeError::UnexpectedChar { ch, offset: start }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str) -> String {
        let mut ts = TypeSystem::new();
        let id = parse_type(&mut ts, text).unwrap();
        ts.render(id).to_string()
    }

    #[test]
    fn parses_rendered_notation() {
        for text in [
            "Int",
            "()",
            "<invalid>",
            "[File]",
            "(Int, Str, Bool)",
            "Int -> Str -> Bool",
            "(Int -> Int) -> Bool",
            "forall 'a. ['a] -> 'a",
            "forall 'a, 'b. 'a -> 'b -> ('a, 'b)",
        ] {
            assert_eq!(round_trip(text), text);
        }
    }

    #[test]
    fn arrows_associate_right() {
        let mut ts = TypeSystem::new();
        let f = parse_type(&mut ts, "Int -> Str -> Bool").unwrap();
        let Type::Fn { from, to } = ts.get(f).clone() else {
            panic!("expected a function");
        };
        assert_eq!(from, ts.int());
        assert_eq!(ts.render(to), "Str -> Bool");
    }

    #[test]
    fn free_variables_are_generalized() {
        assert_eq!(round_trip("'x -> 'x"), "forall 'a. 'a -> 'a");
        assert_eq!(round_trip("('q, 'p)"), "forall 'a, 'b. ('a, 'b)");
        assert_eq!(round_trip("forall 'a. 'a -> 'b"), "forall 'a, 'b. 'a -> 'b");
    }

    #[test]
    fn parenthesized_type_is_not_a_tuple() {
        assert_eq!(round_trip("(Int)"), "Int");
        assert_eq!(round_trip("  [ ( File ) ]  "), "[File]");
    }

    #[test]
    fn inner_quantifier_shadows_outer() {
        let mut ts = TypeSystem::new();
        let id = parse_type(&mut ts, "forall 'a. 'a -> (forall 'a. 'a)").unwrap();
        let Type::Forall { vars, inner } = ts.get(id).clone() else {
            panic!("expected a quantifier");
        };
        let Type::Fn { from, to } = ts.get(inner).clone() else {
            panic!("expected a function");
        };
        assert_eq!(from, vars[0]);
        let Type::Forall { vars: inner_vars, inner: body } = ts.get(to).clone() else {
            panic!("expected a nested quantifier");
        };
        assert_eq!(body, inner_vars[0]);
        assert_ne!(body, from);
    }

    #[test]
    fn reports_errors() {
        let mut ts = TypeSystem::new();
        assert_eq!(
            parse_type(&mut ts, "Integer"),
            Err(ParseTypeError::UnknownType {
                name: "Integer".to_string(),
                offset: 0
            })
        );
        assert_eq!(parse_type(&mut ts, "Int ->"), Err(ParseTypeError::UnexpectedEnd));
        assert_eq!(
            parse_type(&mut ts, "[Int"),
            Err(ParseTypeError::UnexpectedEnd)
        );
        assert_eq!(
            parse_type(&mut ts, "Int Str"),
            Err(ParseTypeError::TrailingInput { offset: 4 })
        );
        assert_eq!(
            parse_type(&mut ts, "#"),
            Err(ParseTypeError::UnexpectedChar { ch: '#', offset: 0 })
        );
        assert_eq!(
            parse_type(&mut ts, "forall a. a"),
            Err(ParseTypeError::Expected {
                expected: "type variable",
                offset: 7
            })
        );
    }
}
