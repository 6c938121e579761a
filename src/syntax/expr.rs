//! The unified expression carrier.
//!
//! Substitution and free-name analysis are each written once against
//! `Expr`, a tagged sum of the three sorts, rather than once per sort.
//! Rust has no convenient dependent/phantom-tagged enum for this, so
//! `Expr` carries a runtime witness (which variant it is) and the
//! sort-specific wrapper functions in `syntax::subst` check that witness
//! at the boundary and convert back to a concrete sort.
//!
//! Nothing outside `syntax::subst` and `syntax::free_vars` should need
//! to construct an `Expr` directly.

use std::rc::Rc;

use crate::syntax::ast::{Kind, Term, Type};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Term(Rc<Term>),
    Type(Rc<Type>),
    Kind(Rc<Kind>),
}

impl From<Rc<Term>> for Expr {
    fn from(t: Rc<Term>) -> Expr {
        Expr::Term(t)
    }
}

impl From<Rc<Type>> for Expr {
    fn from(t: Rc<Type>) -> Expr {
        Expr::Type(t)
    }
}

impl From<Rc<Kind>> for Expr {
    fn from(k: Rc<Kind>) -> Expr {
        Expr::Kind(k)
    }
}

impl Expr {
    /// Unwrap a `Term`. Panics if `self` is not a `Term`: a bug in one
    /// of the sort-specific wrappers, never reachable from a well-typed
    /// call site.
    pub fn into_term(self) -> Rc<Term> {
        match self {
            Expr::Term(t) => t,
            _ => unreachable!("expected a term expression, sort witness mismatch"),
        }
    }

    pub fn into_type(self) -> Rc<Type> {
        match self {
            Expr::Type(t) => t,
            _ => unreachable!("expected a type expression, sort witness mismatch"),
        }
    }

    pub fn into_kind(self) -> Rc<Kind> {
        match self {
            Expr::Kind(k) => k,
            _ => unreachable!("expected a kind expression, sort witness mismatch"),
        }
    }
}
