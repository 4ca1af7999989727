//! Error codes with their titles and categories.
//!
//! E02xx come from the symbol table, E03xx from the type checker, E039x
//! flag analyzer defects rather than problems in the program.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    Resolution,
    Type,
    Internal,
}

#[derive(Debug)]
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

const fn info(code: &'static str, title: &'static str, category: ErrorCategory) -> ErrorCodeInfo {
    ErrorCodeInfo {
        code,
        title,
        category,
    }
}

pub static CODES: &[ErrorCodeInfo] = &[
    info("E0200", "undefined symbol", ErrorCategory::Resolution),
    info("E0201", "duplicate definition", ErrorCategory::Resolution),
    info("E0300", "untyped symbol", ErrorCategory::Type),
    info("E0301", "application mismatch", ErrorCategory::Type),
    info("E0302", "list element mismatch", ErrorCategory::Type),
    info("E0303", "empty list literal", ErrorCategory::Type),
    info("E0304", "invalid type notation", ErrorCategory::Type),
    info("E0398", "malformed type", ErrorCategory::Internal),
    info("E0399", "unhandled node kind", ErrorCategory::Internal),
];

pub fn lookup(code: &str) -> Option<&'static ErrorCodeInfo> {
    CODES.iter().find(|info| info.code == code)
}
