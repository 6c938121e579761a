//! Free-name analysis.
//!
//! `free_term_names`/`free_type_names` traverse a `Term`, `Type`, or
//! `Kind` and return the free occurrences in the requested namespace,
//! subtracting a bound name at every binder that introduces one. This
//! is purely semantic bookkeeping: no alpha-renaming happens here, and
//! a name may appear more than once in the result (it is a multiset,
//! represented as a `Vec` since the only consumers are membership
//! tests and hygiene assertions in tests).

use crate::syntax::ast::{Kind, Term, Type};
use crate::syntax::names::{NameTerm, NameType};

fn remove_term(names: &mut Vec<NameTerm>, bound: &NameTerm) {
    names.retain(|n| n != bound);
}

fn remove_type(names: &mut Vec<NameType>, bound: &NameType) {
    names.retain(|n| n != bound);
}

/// Free term-names of a `Term`.
pub fn free_term_names_of_term(term: &Term) -> Vec<NameTerm> {
    match term {
        Term::Ref(x) => vec![x.clone()],
        Term::AbsTm(x, ty, body) => {
            let mut names = free_term_names_of_type(ty);
            let mut body_names = free_term_names_of_term(body);
            remove_term(&mut body_names, x);
            names.append(&mut body_names);
            names
        }
        Term::AppTm(a, b) => {
            let mut names = free_term_names_of_term(a);
            names.append(&mut free_term_names_of_term(b));
            names
        }
        Term::AbsTy(_, k, body) => {
            let mut names = free_term_names_of_kind(k);
            names.append(&mut free_term_names_of_term(body));
            names
        }
        Term::AppTy(a, t) => {
            let mut names = free_term_names_of_term(a);
            names.append(&mut free_term_names_of_type(t));
            names
        }
    }
}

/// Free type-names of a `Term`.
pub fn free_type_names_of_term(term: &Term) -> Vec<NameType> {
    match term {
        Term::Ref(_) => vec![],
        Term::AbsTm(_, ty, body) => {
            let mut names = free_type_names_of_type(ty);
            names.append(&mut free_type_names_of_term(body));
            names
        }
        Term::AppTm(a, b) => {
            let mut names = free_type_names_of_term(a);
            names.append(&mut free_type_names_of_term(b));
            names
        }
        Term::AbsTy(x, k, body) => {
            let mut names = free_type_names_of_kind(k);
            let mut body_names = free_type_names_of_term(body);
            remove_type(&mut body_names, x);
            names.append(&mut body_names);
            names
        }
        Term::AppTy(a, t) => {
            let mut names = free_type_names_of_term(a);
            names.append(&mut free_type_names_of_type(t));
            names
        }
    }
}

/// Free term-names of a `Type`.
pub fn free_term_names_of_type(ty: &Type) -> Vec<NameTerm> {
    match ty {
        Type::Ref(_) => vec![],
        Type::AbsTm(x, s, t) => {
            let mut names = free_term_names_of_type(s);
            let mut body_names = free_term_names_of_type(t);
            remove_term(&mut body_names, x);
            names.append(&mut body_names);
            names
        }
        Type::AppTm(t, a) => {
            let mut names = free_term_names_of_type(t);
            names.append(&mut free_term_names_of_term(a));
            names
        }
        Type::AbsTy(_, k, t) => {
            let mut names = free_term_names_of_kind(k);
            names.append(&mut free_term_names_of_type(t));
            names
        }
        Type::AppTy(s, t) => {
            let mut names = free_term_names_of_type(s);
            names.append(&mut free_term_names_of_type(t));
            names
        }
        Type::Iota(x, t) => {
            let mut names = free_term_names_of_type(t);
            remove_term(&mut names, x);
            names
        }
    }
}

/// Free type-names of a `Type`.
pub fn free_type_names_of_type(ty: &Type) -> Vec<NameType> {
    match ty {
        Type::Ref(x) => vec![x.clone()],
        Type::AbsTm(_, s, t) => {
            let mut names = free_type_names_of_type(s);
            names.append(&mut free_type_names_of_type(t));
            names
        }
        Type::AppTm(t, a) => {
            let mut names = free_type_names_of_type(t);
            names.append(&mut free_type_names_of_term(a));
            names
        }
        Type::AbsTy(x, k, t) => {
            let mut names = free_type_names_of_kind(k);
            let mut body_names = free_type_names_of_type(t);
            remove_type(&mut body_names, x);
            names.append(&mut body_names);
            names
        }
        Type::AppTy(s, t) => {
            let mut names = free_type_names_of_type(s);
            names.append(&mut free_type_names_of_type(t));
            names
        }
        Type::Iota(_, t) => free_type_names_of_type(t),
    }
}

/// Free term-names of a `Kind`.
pub fn free_term_names_of_kind(kind: &Kind) -> Vec<NameTerm> {
    match kind {
        Kind::Unit => vec![],
        Kind::AbsTm(x, t, k) => {
            let mut names = free_term_names_of_type(t);
            let mut body_names = free_term_names_of_kind(k);
            remove_term(&mut body_names, x);
            names.append(&mut body_names);
            names
        }
        Kind::AbsTy(_, k1, k2) => {
            let mut names = free_term_names_of_kind(k1);
            names.append(&mut free_term_names_of_kind(k2));
            names
        }
    }
}

/// Free type-names of a `Kind`.
pub fn free_type_names_of_kind(kind: &Kind) -> Vec<NameType> {
    match kind {
        Kind::Unit => vec![],
        Kind::AbsTm(_, t, k) => {
            let mut names = free_type_names_of_type(t);
            names.append(&mut free_type_names_of_kind(k));
            names
        }
        Kind::AbsTy(x, k1, k2) => {
            let mut names = free_type_names_of_kind(k1);
            let mut body_names = free_type_names_of_kind(k2);
            remove_type(&mut body_names, x);
            names.append(&mut body_names);
            names
        }
    }
}
