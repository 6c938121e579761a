//! Capture-respecting (but not capture-avoiding) substitution.
//!
//! `substitute` is written once, generically over the unified [`Expr`]
//! sum, and recurses into whichever sort its argument actually is. The
//! six public functions below are the typed call sites the rest of the
//! crate actually uses; they convert to `Expr` and back, so the runtime
//! sort witness in `Expr` never escapes this module.
//!
//! No alpha-renaming happens anywhere here. The calculus relies on
//! globally fresh binder names supplied by the (out-of-scope) parser;
//! this crate mirrors that discipline rather than strengthening it, so
//! tests must supply distinct binder names when they want to avoid
//! capture.

use std::rc::Rc;

use crate::syntax::ast::{Kind, Term, Type};
use crate::syntax::expr::Expr;
use crate::syntax::names::{NameTerm, NameType};

/// What is being substituted: a term for a term-name, or a type for a
/// type-name. There is no kind-name case because no syntax in this
/// calculus refers to a kind-name (see `syntax::names::NameKind`).
enum Subst {
    Term(NameTerm, Rc<Term>),
    Type(NameType, Rc<Type>),
}

fn substitute(subst: &Subst, expr: Expr) -> Expr {
    match expr {
        Expr::Term(t) => Expr::Term(subst_term(subst, &t)),
        Expr::Type(t) => Expr::Type(subst_type(subst, &t)),
        Expr::Kind(k) => Expr::Kind(subst_kind(subst, &k)),
    }
}

fn subst_term(subst: &Subst, term: &Rc<Term>) -> Rc<Term> {
    match &**term {
        Term::Ref(y) => match subst {
            Subst::Term(x, e) if x == y => e.clone(),
            _ => term.clone(),
        },
        Term::AbsTm(y, ty, body) => {
            let ty = subst_type(subst, ty);
            let body = if matches!(subst, Subst::Term(x, _) if x == y) {
                body.clone()
            } else {
                subst_term(subst, body)
            };
            Rc::new(Term::AbsTm(y.clone(), ty, body))
        }
        Term::AppTm(a, b) => Rc::new(Term::AppTm(subst_term(subst, a), subst_term(subst, b))),
        Term::AbsTy(y, k, body) => {
            let k = subst_kind(subst, k);
            let body = if matches!(subst, Subst::Type(x, _) if x == y) {
                body.clone()
            } else {
                subst_term(subst, body)
            };
            Rc::new(Term::AbsTy(y.clone(), k, body))
        }
        Term::AppTy(a, t) => Rc::new(Term::AppTy(subst_term(subst, a), subst_type(subst, t))),
    }
}

fn subst_type(subst: &Subst, ty: &Rc<Type>) -> Rc<Type> {
    match &**ty {
        Type::Ref(y) => match subst {
            Subst::Type(x, e) if x == y => e.clone(),
            _ => ty.clone(),
        },
        Type::AbsTm(y, s, t) => {
            let s = subst_type(subst, s);
            let t = if matches!(subst, Subst::Term(x, _) if x == y) {
                t.clone()
            } else {
                subst_type(subst, t)
            };
            Rc::new(Type::AbsTm(y.clone(), s, t))
        }
        Type::AppTm(t, a) => Rc::new(Type::AppTm(subst_type(subst, t), subst_term(subst, a))),
        Type::AbsTy(y, k, t) => {
            let k = subst_kind(subst, k);
            let t = if matches!(subst, Subst::Type(x, _) if x == y) {
                t.clone()
            } else {
                subst_type(subst, t)
            };
            Rc::new(Type::AbsTy(y.clone(), k, t))
        }
        Type::AppTy(s, t) => Rc::new(Type::AppTy(subst_type(subst, s), subst_type(subst, t))),
        Type::Iota(y, t) => {
            let t = if matches!(subst, Subst::Term(x, _) if x == y) {
                t.clone()
            } else {
                subst_type(subst, t)
            };
            Rc::new(Type::Iota(y.clone(), t))
        }
    }
}

fn subst_kind(subst: &Subst, kind: &Rc<Kind>) -> Rc<Kind> {
    match &**kind {
        Kind::Unit => kind.clone(),
        Kind::AbsTm(y, t, k) => {
            let t = subst_type(subst, t);
            let k = if matches!(subst, Subst::Term(x, _) if x == y) {
                k.clone()
            } else {
                subst_kind(subst, k)
            };
            Rc::new(Kind::AbsTm(y.clone(), t, k))
        }
        Kind::AbsTy(y, k1, k2) => {
            let k1 = subst_kind(subst, k1);
            let k2 = if matches!(subst, Subst::Type(x, _) if x == y) {
                k2.clone()
            } else {
                subst_kind(subst, k2)
            };
            Rc::new(Kind::AbsTy(y.clone(), k1, k2))
        }
    }
}

/// `[x ↦ e] t` where `t` is a term.
pub fn subst_term_in_term(x: &NameTerm, e: &Rc<Term>, t: &Rc<Term>) -> Rc<Term> {
    substitute(&Subst::Term(x.clone(), e.clone()), Expr::from(t.clone())).into_term()
}

/// `[x ↦ e] T` where `T` is a type.
pub fn subst_term_in_type(x: &NameTerm, e: &Rc<Term>, t: &Rc<Type>) -> Rc<Type> {
    substitute(&Subst::Term(x.clone(), e.clone()), Expr::from(t.clone())).into_type()
}

/// `[x ↦ e] K` where `K` is a kind.
pub fn subst_term_in_kind(x: &NameTerm, e: &Rc<Term>, k: &Rc<Kind>) -> Rc<Kind> {
    substitute(&Subst::Term(x.clone(), e.clone()), Expr::from(k.clone())).into_kind()
}

/// `[X ↦ T] t` where `t` is a term.
pub fn subst_type_in_term(x: &NameType, ty: &Rc<Type>, t: &Rc<Term>) -> Rc<Term> {
    substitute(&Subst::Type(x.clone(), ty.clone()), Expr::from(t.clone())).into_term()
}

/// `[X ↦ T] S` where `S` is a type.
pub fn subst_type_in_type(x: &NameType, ty: &Rc<Type>, t: &Rc<Type>) -> Rc<Type> {
    substitute(&Subst::Type(x.clone(), ty.clone()), Expr::from(t.clone())).into_type()
}

/// `[X ↦ T] K` where `K` is a kind.
pub fn subst_type_in_kind(x: &NameType, ty: &Rc<Type>, k: &Rc<Kind>) -> Rc<Kind> {
    substitute(&Subst::Type(x.clone(), ty.clone()), Expr::from(k.clone())).into_kind()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tm_ref(x: &str) -> Rc<Term> {
        Rc::new(Term::ref_(x))
    }

    fn ty_ref(x: &str) -> Rc<Type> {
        Rc::new(Type::ref_(x))
    }

    #[test]
    fn replaces_matching_ref() {
        let x = NameTerm::new("x");
        let e = tm_ref("e");
        assert_eq!(subst_term_in_term(&x, &e, &tm_ref("x")), e);
    }

    #[test]
    fn leaves_non_matching_ref() {
        let x = NameTerm::new("x");
        let e = tm_ref("e");
        assert_eq!(subst_term_in_term(&x, &e, &tm_ref("y")), tm_ref("y"));
    }

    #[test]
    fn namespace_isolation() {
        // substituting a term-name must not touch a type-name Ref with
        // the same source string.
        let x = NameTerm::new("x");
        let e = tm_ref("e");
        assert_eq!(subst_term_in_type(&x, &e, &ty_ref("x")), ty_ref("x"));
    }

    #[test]
    fn shadowing_stops_descent() {
        // [x -> e] (\x:A. x)  must leave the body alone: the inner x is bound.
        let x = NameTerm::new("x");
        let e = tm_ref("e");
        let term = Rc::new(Term::AbsTm(NameTerm::new("x"), ty_ref("A"), tm_ref("x")));
        assert_eq!(subst_term_in_term(&x, &e, &term), term);
    }

    #[test]
    fn descends_under_unrelated_binder() {
        // [x -> e] (\y:A. x) = \y:A. e
        let x = NameTerm::new("x");
        let e = tm_ref("e");
        let term = Rc::new(Term::AbsTm(NameTerm::new("y"), ty_ref("A"), tm_ref("x")));
        let expected = Rc::new(Term::AbsTm(NameTerm::new("y"), ty_ref("A"), e.clone()));
        assert_eq!(subst_term_in_term(&x, &e, &term), expected);
    }

    #[test]
    fn self_type_introduction_substitution() {
        // [x -> a] (iota x. T)  leaves T alone: x is bound by the iota.
        let x = NameTerm::new("x");
        let a = tm_ref("a");
        let iota = Rc::new(Type::Iota(NameTerm::new("x"), ty_ref("T")));
        assert_eq!(subst_term_in_type(&x, &a, &iota), iota);
    }
}
