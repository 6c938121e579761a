//! Bidirectional type/kind checker and β/δ-normalizing evaluator for a
//! three-level calculus (terms, types, kinds) with dependent
//! abstraction at every level and a self type ι.
//!
//! The grammar, parser, pretty-printer, and a command-line driver are
//! external collaborators and out of scope for this crate: callers
//! build a [`syntax::Prgm`] directly and hand it to
//! [`semantics::elaborate_program`].

pub mod semantics;
pub mod syntax;

pub use semantics::{
    check_kind, check_type, elaborate_program, evaluate_term, evaluate_type, synthesize_kind, synthesize_type, unify_kind,
    unify_term, unify_type, InternalError, TypeError,
};
pub use syntax::{Closure, Context, Ident, Kind, NameKind, NameTerm, NameType, Prgm, Stmt, Term, Type};
