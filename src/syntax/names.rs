//! The three disjoint name namespaces: terms, types, and kinds.
//!
//! Each namespace is its own newtype over a shared, cheaply-cloned
//! [`Ident`], so that mixing a name from one namespace into a binder
//! from another is a compile error almost everywhere in this crate. The
//! one place that can't be checked at compile time is the unified
//! [`crate::syntax::expr::Expr`] sum used by generic substitution; that
//! boundary checks its namespace witness at runtime (see
//! `syntax::expr`).

use std::fmt;
use std::rc::Rc;

/// An opaque identifier. Identity is structural: two idents are equal
/// iff their strings are equal, regardless of where they were built.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Ident(Rc<str>);

impl Ident {
    pub fn new(name: impl Into<String>) -> Ident {
        Ident(Rc::from(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'a> From<&'a str> for Ident {
    fn from(name: &'a str) -> Ident {
        Ident::new(name)
    }
}

macro_rules! name_namespace {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, PartialEq, Hash)]
        pub struct $name(pub Ident);

        impl $name {
            pub fn new(name: impl Into<String>) -> $name {
                $name(Ident::new(name))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(name: &'a str) -> $name {
                $name::new(name)
            }
        }
    };
}

name_namespace!(
    /// A term-level name: bound by `Term::AbsTm`, `Type::AbsTm`,
    /// `Type::Iota`, and `Kind::AbsTm`.
    NameTerm
);
name_namespace!(
    /// A type-level name: bound by `Term::AbsTy`, `Type::AbsTy`, and
    /// `Kind::AbsTy`.
    NameType
);
name_namespace!(
    /// A kind-level name: bound only inside a [`crate::syntax::context::Closure`]'s
    /// kind-synonym map. No term/type/kind constructor in this calculus
    /// ever refers to one.
    NameKind
);
