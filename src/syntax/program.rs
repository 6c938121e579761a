//! The external interface shape a parser hands the driver.
//!
//! `Prgm`/`Stmt` are the only data this crate expects from a collaborator
//! outside its own boundary; everything else (grammar, concrete syntax,
//! pretty-printing, a CLI) is out of scope.

use std::rc::Rc;

use crate::syntax::ast::{Kind, Term, Type};
use crate::syntax::names::{NameTerm, NameType};

/// A top-level statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `x : T = a` — a term definition with its declared type.
    DefnTm(NameTerm, Rc<Type>, Rc<Term>),
    /// `X :: K = T` — a type definition with its declared kind.
    DefnTy(NameType, Rc<Kind>, Rc<Type>),
}

/// An ordered program: a list of top-level statements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prgm(pub Vec<Stmt>);

impl Prgm {
    pub fn new(stmts: Vec<Stmt>) -> Prgm {
        Prgm(stmts)
    }
}
