// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Human-readable type strings.

use std::collections::HashMap;

use crate::system::TypeSystem;
use crate::types::{Type, TypeId, TypeKind};

/// How many variables get a letter of their own within one rendering.
pub const VAR_NAME_LIMIT: usize = 26;

/// Name given to variables past [`VAR_NAME_LIMIT`].
pub const EXHAUSTED_VAR_NAME: &str = "'?";

impl TypeSystem {
    /// Render a type, e.g. `forall 'a. ['a] -> 'a`.
    ///
    /// The result is memoized on the type: rendering the same `TypeId` again
    /// returns the same string without recomputing it. Variables are named
    /// `'a`, `'b`, ... in order of first appearance within this rendering.
    /// A quantifier only shows its `forall` prefix at the outermost position.
    pub fn render(&self, id: TypeId) -> &str {
        self.entries[id.index()]
            .rendered
            .get_or_init(|| Renderer::new(self).render(id, true))
    }
}

struct Renderer<'a> {
    ts: &'a TypeSystem,
    names: HashMap<TypeId, String>,
    given: usize,
}

impl<'a> Renderer<'a> {
    fn new(ts: &'a TypeSystem) -> Self {
        Self {
            ts,
            names: HashMap::new(),
            given: 0,
        }
    }

    fn var_name(&mut self, var: TypeId) -> String {
        if let Some(name) = self.names.get(&var) {
            return name.clone();
        }
        let name = if self.given < VAR_NAME_LIMIT {
            let letter = (b'a' + self.given as u8) as char;
            self.given += 1;
            format!("'{}", letter)
        } else {
            tracing::warn!(limit = VAR_NAME_LIMIT, "ran out of type variable names");
            EXHAUSTED_VAR_NAME.to_string()
        };
        self.names.insert(var, name.clone());
        name
    }

    fn render(&mut self, id: TypeId, outermost: bool) -> String {
        let ts = self.ts;
        match ts.get(id) {
            Type::Unit => "()".to_string(),
            Type::Int => "Int".to_string(),
            Type::Num => "Num".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::Str => "Str".to_string(),
            Type::File => "File".to_string(),
            Type::Invalid => "<invalid>".to_string(),
            Type::Fn { from, to } => {
                let (from, to) = (*from, *to);
                let from_str = self.render(from, false);
                let to_str = self.render(to, false);
                if matches!(ts.kind(from), TypeKind::Fn | TypeKind::Forall) {
                    format!("({}) -> {}", from_str, to_str)
                } else {
                    format!("{} -> {}", from_str, to_str)
                }
            }
            Type::List(elem) => format!("[{}]", self.render(*elem, false)),
            Type::Tuple(components) => {
                let parts: Vec<String> = components
                    .iter()
                    .map(|&c| self.render(c, false))
                    .collect();
                format!("({})", parts.join(", "))
            }
            Type::Var(_) => self.var_name(id),
            Type::Forall { vars, inner } => {
                let inner_str = self.render(*inner, false);
                if !outermost {
                    return inner_str;
                }
                let names: Vec<String> = vars.iter().map(|&v| self.var_name(v)).collect();
                format!("forall {}. {}", names.join(", "), inner_str)
            }
        }
    }
}
