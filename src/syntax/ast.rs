//! The core syntax: terms, types, and kinds of the three-level calculus.
//!
//! # Judgements
//!
//! This module only carries the data; the judgements themselves
//! (`semantics::check`) are bidirectional:
//!
//! | name            | notation        | implementing function            |
//! |-----------------|-----------------|-----------------------------------|
//! | kind synthesis  | `Γ ⊢ T ↓ K`     | `semantics::synthesize_kind`       |
//! | kind checking   | `Γ ⊢ T ↑ K`     | `semantics::check_kind`            |
//! | type synthesis  | `Γ ⊢ a ↓ T`     | `semantics::synthesize_type`       |
//! | type checking   | `Γ ⊢ a ↑ T`     | `semantics::check_type`            |
//!
//! Every node is `Rc`-boxed so that substitution and reduction can share
//! unchanged subtrees instead of deep-copying them.

use std::fmt;
use std::rc::Rc;

use crate::syntax::names::{NameTerm, NameType};

/// Terms. `AbsTm` is λ over a term; `AbsTy` is λ over a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// A reference to a term-bound name.
    Ref(NameTerm),
    /// `λx:T. a` — abstraction over a term.
    AbsTm(NameTerm, Rc<Type>, Rc<Term>),
    /// `a b` — term applied to a term.
    AppTm(Rc<Term>, Rc<Term>),
    /// `ΛX:K. a` — abstraction over a type.
    AbsTy(NameType, Rc<Kind>, Rc<Term>),
    /// `a T` — term applied to a type.
    AppTy(Rc<Term>, Rc<Type>),
}

/// Types. `AbsTm` doubles as both the dependent-function ("Π-term")
/// type former and the classifier of a term-level `AbsTm`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// A reference to a type-bound name.
    Ref(NameType),
    /// `Πx:S. T` — a dependent function type over a term.
    AbsTm(NameTerm, Rc<Type>, Rc<Type>),
    /// `T a` — type applied to a term (a dependent-function type's elimination
    /// at the type level).
    AppTm(Rc<Type>, Rc<Term>),
    /// `ΛX:K. T` — abstraction over a type, at the type level.
    AbsTy(NameType, Rc<Kind>, Rc<Type>),
    /// `S T` — type applied to a type.
    AppTy(Rc<Type>, Rc<Type>),
    /// `ι x. T` — the self type: the type of terms `a` such that
    /// `a : T[x := a]`.
    Iota(NameTerm, Rc<Type>),
}

/// Kinds. `Unit` is the kind of types, written `⋆`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    /// `⋆`
    Unit,
    /// `Πx:T. K` — a dependent function kind over a term.
    AbsTm(NameTerm, Rc<Type>, Rc<Kind>),
    /// `ΠX:K. L` — a dependent function kind over a type.
    AbsTy(NameType, Rc<Kind>, Rc<Kind>),
}

impl Term {
    pub fn ref_(x: impl Into<NameTerm>) -> Term {
        Term::Ref(x.into())
    }
}

impl Type {
    pub fn ref_(x: impl Into<NameType>) -> Type {
        Type::Ref(x.into())
    }
}

// Distinct constructs print distinctly, and because binder names are
// never invented or renamed internally, alpha-equivalent terms built
// from the same source names render identically.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Ref(x) => write!(f, "{}", x),
            Term::AbsTm(x, ty, body) => write!(f, "(\\{}:{}. {})", x, ty, body),
            Term::AppTm(a, b) => write!(f, "({} {})", a, b),
            Term::AbsTy(x, k, body) => write!(f, "(/\\{}:{}. {})", x, k, body),
            Term::AppTy(a, t) => write!(f, "({} [{}])", a, t),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Ref(x) => write!(f, "{}", x),
            Type::AbsTm(x, s, t) => write!(f, "(Pi {}:{}. {})", x, s, t),
            Type::AppTm(t, a) => write!(f, "({} {})", t, a),
            Type::AbsTy(x, k, t) => write!(f, "(Pi [{}:{}]. {})", x, k, t),
            Type::AppTy(s, t) => write!(f, "({} [{}])", s, t),
            Type::Iota(x, t) => write!(f, "(iota {}. {})", x, t),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Unit => write!(f, "*"),
            Kind::AbsTm(x, t, k) => write!(f, "(Pi {}:{}. {})", x, t, k),
            Kind::AbsTy(x, k1, k2) => write!(f, "(Pi [{}:{}]. {})", x, k1, k2),
        }
    }
}
