//! Unification: structural equality modulo congruence closure of β/δ
//! reduction.
//!
//! Both sides are driven to weak head normal form at every level before
//! their heads are compared; if the heads agree, their children are
//! compared the same way (recursively re-normalizing as needed), and if
//! they still disagree after normalizing, the failure names both the
//! immediately offending subexpressions and the outermost pair the
//! caller originally asked to unify.
//!
//! α-equivalence is realized without generating fresh names: when two
//! binders line up, the right-hand binder name is substituted for the
//! left-hand one throughout the right operand's children before they
//! are compared.

use std::rc::Rc;

use crate::semantics::errors::TypeError;
use crate::semantics::reduce::{evaluate_term, evaluate_type};
use crate::syntax::ast::{Kind, Term, Type};
use crate::syntax::context::Context;
use crate::syntax::subst::{
    subst_term_in_kind, subst_term_in_term, subst_term_in_type, subst_type_in_kind, subst_type_in_term, subst_type_in_type,
};

pub fn unify_term(ctx: &Context, left: &Rc<Term>, right: &Rc<Term>) -> Result<(), TypeError> {
    let outer_left = left.to_string();
    let outer_right = right.to_string();
    unify_term_rec(ctx, left, right, &outer_left, &outer_right)
}

pub fn unify_type(ctx: &Context, left: &Rc<Type>, right: &Rc<Type>) -> Result<(), TypeError> {
    let outer_left = left.to_string();
    let outer_right = right.to_string();
    unify_type_rec(ctx, left, right, &outer_left, &outer_right)
}

pub fn unify_kind(ctx: &Context, left: &Rc<Kind>, right: &Rc<Kind>) -> Result<(), TypeError> {
    let outer_left = left.to_string();
    let outer_right = right.to_string();
    unify_kind_rec(ctx, left, right, &outer_left, &outer_right)
}

fn unify_term_rec(
    ctx: &Context,
    left: &Rc<Term>,
    right: &Rc<Term>,
    outer_left: &str,
    outer_right: &str,
) -> Result<(), TypeError> {
    let left_whnf = evaluate_term(ctx, left)?;
    let right_whnf = evaluate_term(ctx, right)?;
    match (&*left_whnf, &*right_whnf) {
        (Term::Ref(x), Term::Ref(y)) if x == y => Ok(()),

        (Term::AbsTm(x1, ty1, body1), Term::AbsTm(x2, ty2, body2)) => {
            unify_type_rec(ctx, ty1, ty2, outer_left, outer_right)?;
            let body2 = subst_term_in_term(x2, &Rc::new(Term::Ref(x1.clone())), body2);
            unify_term_rec(ctx, body1, &body2, outer_left, outer_right)
        }

        (Term::AppTm(a1, b1), Term::AppTm(a2, b2)) => {
            unify_term_rec(ctx, a1, a2, outer_left, outer_right)?;
            unify_term_rec(ctx, b1, b2, outer_left, outer_right)
        }

        (Term::AbsTy(x1, k1, body1), Term::AbsTy(x2, k2, body2)) => {
            unify_kind_rec(ctx, k1, k2, outer_left, outer_right)?;
            let body2 = subst_type_in_term(x2, &Rc::new(Type::Ref(x1.clone())), body2);
            unify_term_rec(ctx, body1, &body2, outer_left, outer_right)
        }

        (Term::AppTy(a1, t1), Term::AppTy(a2, t2)) => {
            unify_term_rec(ctx, a1, a2, outer_left, outer_right)?;
            unify_type_rec(ctx, t1, t2, outer_left, outer_right)
        }

        _ => Err(TypeError::mismatch(&*left_whnf, &*right_whnf, outer_left, outer_right)),
    }
}

fn unify_type_rec(
    ctx: &Context,
    left: &Rc<Type>,
    right: &Rc<Type>,
    outer_left: &str,
    outer_right: &str,
) -> Result<(), TypeError> {
    let left_whnf = evaluate_type(ctx, left)?;
    let right_whnf = evaluate_type(ctx, right)?;
    match (&*left_whnf, &*right_whnf) {
        (Type::Ref(x), Type::Ref(y)) if x == y => Ok(()),

        (Type::AbsTm(x1, s1, t1), Type::AbsTm(x2, s2, t2)) => {
            unify_type_rec(ctx, s1, s2, outer_left, outer_right)?;
            let t2 = subst_term_in_type(x2, &Rc::new(Term::Ref(x1.clone())), t2);
            unify_type_rec(ctx, t1, &t2, outer_left, outer_right)
        }

        (Type::AppTm(t1, a1), Type::AppTm(t2, a2)) => {
            unify_type_rec(ctx, t1, t2, outer_left, outer_right)?;
            unify_term_rec(ctx, a1, a2, outer_left, outer_right)
        }

        (Type::AbsTy(x1, k1, t1), Type::AbsTy(x2, k2, t2)) => {
            unify_kind_rec(ctx, k1, k2, outer_left, outer_right)?;
            let t2 = subst_type_in_type(x2, &Rc::new(Type::Ref(x1.clone())), t2);
            unify_type_rec(ctx, t1, &t2, outer_left, outer_right)
        }

        (Type::AppTy(s1, t1), Type::AppTy(s2, t2)) => {
            unify_type_rec(ctx, s1, s2, outer_left, outer_right)?;
            unify_type_rec(ctx, t1, t2, outer_left, outer_right)
        }

        (Type::Iota(x1, t1), Type::Iota(x2, t2)) => {
            let t2 = subst_term_in_type(x2, &Rc::new(Term::Ref(x1.clone())), t2);
            unify_type_rec(ctx, t1, &t2, outer_left, outer_right)
        }

        _ => Err(TypeError::mismatch(&*left_whnf, &*right_whnf, outer_left, outer_right)),
    }
}

fn unify_kind_rec(
    ctx: &Context,
    left: &Rc<Kind>,
    right: &Rc<Kind>,
    outer_left: &str,
    outer_right: &str,
) -> Result<(), TypeError> {
    // Kinds never reduce, so there is no normalize-and-retry step here:
    // heads are compared as given.
    match (&**left, &**right) {
        (Kind::Unit, Kind::Unit) => Ok(()),

        (Kind::AbsTm(x1, t1, k1), Kind::AbsTm(x2, t2, k2)) => {
            unify_type_rec(ctx, t1, t2, outer_left, outer_right)?;
            let k2 = subst_term_in_kind(x2, &Rc::new(Term::Ref(x1.clone())), k2);
            unify_kind_rec(ctx, k1, &k2, outer_left, outer_right)
        }

        (Kind::AbsTy(x1, k1a, k1b), Kind::AbsTy(x2, k2a, k2b)) => {
            unify_kind_rec(ctx, k1a, k2a, outer_left, outer_right)?;
            let k2b = subst_type_in_kind(x2, &Rc::new(Type::Ref(x1.clone())), k2b);
            unify_kind_rec(ctx, k1b, &k2b, outer_left, outer_right)
        }

        _ => Err(TypeError::mismatch(&**left, &**right, outer_left, outer_right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::names::{NameTerm, NameType};

    fn ty_ref(x: &str) -> Rc<Type> {
        Rc::new(Type::ref_(x))
    }

    #[test]
    fn identical_refs_unify() {
        let ctx = Context::empty();
        assert!(unify_type(&ctx, &ty_ref("A"), &ty_ref("A")).is_ok());
    }

    #[test]
    fn different_refs_fail() {
        let ctx = Context::empty();
        assert!(unify_type(&ctx, &ty_ref("A"), &ty_ref("B")).is_err());
    }

    #[test]
    fn alpha_equivalent_term_lambdas_unify() {
        // unify(\x:A. x, \y:A. y)
        let ctx = Context::empty();
        let lam_x = Rc::new(Term::AbsTm(NameTerm::new("x"), ty_ref("A"), Rc::new(Term::ref_("x"))));
        let lam_y = Rc::new(Term::AbsTm(NameTerm::new("y"), ty_ref("A"), Rc::new(Term::ref_("y"))));
        assert!(unify_term(&ctx, &lam_x, &lam_y).is_ok());
    }

    #[test]
    fn beta_convertible_terms_unify() {
        // unify((\x:A. x) y, y)
        let ctx = Context::empty();
        let lam = Rc::new(Term::AbsTm(NameTerm::new("x"), ty_ref("A"), Rc::new(Term::ref_("x"))));
        let app = Rc::new(Term::AppTm(lam, Rc::new(Term::ref_("y"))));
        assert!(unify_term(&ctx, &app, &Rc::new(Term::ref_("y"))).is_ok());
    }

    #[test]
    fn mismatch_reports_outer_and_inner_pair() {
        let ctx = Context::empty();
        // Pi x : A . B   vs   Pi x : A . C  --  mismatch is in the bodies.
        let x = NameTerm::new("x");
        let left = Rc::new(Type::AbsTm(x.clone(), ty_ref("A"), ty_ref("B")));
        let right = Rc::new(Type::AbsTm(x, ty_ref("A"), ty_ref("C")));
        match unify_type(&ctx, &left, &right) {
            Err(TypeError::Mismatch {
                inner_left,
                inner_right,
                outer_left,
                outer_right,
            }) => {
                assert_eq!(inner_left, "B");
                assert_eq!(inner_right, "C");
                assert_eq!(outer_left, left.to_string());
                assert_eq!(outer_right, right.to_string());
            }
            other => panic!("expected Mismatch, got {:?}", other),
        }
    }

    #[test]
    fn kind_shape_mismatch_fails_without_reduction() {
        let ctx = Context::empty();
        let unit = Rc::new(Kind::Unit);
        let arrow = Rc::new(Kind::AbsTm(NameTerm::new("x"), ty_ref("A"), Rc::new(Kind::Unit)));
        assert!(unify_kind(&ctx, &unit, &arrow).is_err());
    }

    #[test]
    fn type_abs_ty_binder_renamed_before_comparison() {
        let ctx = Context::empty();
        let k = Rc::new(Kind::Unit);
        let left = Rc::new(Type::AbsTy(NameType::new("X"), k.clone(), ty_ref("X")));
        let right = Rc::new(Type::AbsTy(NameType::new("Y"), k, ty_ref("Y")));
        assert!(unify_type(&ctx, &left, &right).is_ok());
    }
}
