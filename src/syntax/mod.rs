//! The syntax of the language: names, terms, types, kinds, contexts,
//! free-name analysis, and substitution.
//!
//! This module has no notion of type- or kind-checking; that lives in
//! `semantics`, which is the only place in the crate that should need
//! to import from here broadly (most call sites only need `ast` and
//! `names`).

pub mod ast;
pub mod context;
pub mod expr;
pub mod free_vars;
pub mod names;
pub mod program;
pub mod subst;

pub use ast::{Kind, Term, Type};
pub use context::{Closure, Context, ContextView, TermEntry, TypeEntry};
pub use names::{Ident, NameKind, NameTerm, NameType};
pub use program::{Prgm, Stmt};
