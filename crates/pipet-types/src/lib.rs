// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type system and semantic analyzer for the Pipet language.
//!
//! Types live in a [`TypeSystem`] arena and are referred to by [`TypeId`].
//! The [`Analyzer`] walks a bound AST once, bottom-up, and assigns a type to
//! every node. Function application through a pipe falls back to mapping the
//! function over a list argument when direct application fails.

mod types;
mod system;
mod ops;
mod unify;
mod render;
mod parse_type;
mod errors;
mod env;
mod config;
mod prelude;
mod analyze;

pub use types::{Type, TypeId, TypeKind, TypeVarId};
pub use system::TypeSystem;
pub use ops::Application;
pub use errors::{MalformedType, TypeError};
pub use parse_type::{parse_type, ParseTypeError};
pub use env::{Bindings, SymbolEnv};
pub use config::{AnalyzerConfig, ListLiteralPolicy, QuantifierPolicy};
pub use prelude::{declare_prelude, PRELUDE};
pub use analyze::{analyze, Analysis, Analyzer};
