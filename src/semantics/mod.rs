//! Type/kind checking, reduction, unification, and the program driver.
//!
//! This is the only module that depends on all of `syntax`; `syntax`
//! itself never depends back on `semantics`.

pub mod check;
pub mod errors;
pub mod reduce;
pub mod unify;

pub use check::{check_kind, check_type, synthesize_kind, synthesize_type, wellformed_closure, wellformed_context, wellformed_kind};
pub use errors::{InternalError, TypeError};
pub use reduce::{evaluate_term, evaluate_type, reduce_term, reduce_type};
pub use unify::{unify_kind, unify_term, unify_type};

use std::rc::Rc;

use crate::syntax::context::{Closure, Context};
use crate::syntax::program::{Prgm, Stmt};

/// Folds a program's statements into a context, elaborating each
/// declaration against its stated annotation.
///
/// For every statement the annotation is pushed into the context
/// *before* the body is checked, so a definition may refer to its own
/// name under a self type. Once the body's classifier has been
/// synthesized and unified against the annotation, a new `Closure`
/// frame holding the fully-elaborated definition is pushed on top of
/// that same eager frame. The eager frame is shadowed, never removed,
/// matching the context lifecycle invariant that frames are never
/// popped during program elaboration.
pub fn elaborate_program(prgm: &Prgm) -> Result<(), String> {
    let mut ctx = Context::empty();
    for stmt in &prgm.0 {
        ctx = elaborate_stmt(&ctx, stmt).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn elaborate_stmt(ctx: &Context, stmt: &Stmt) -> Result<Context, TypeError> {
    match stmt {
        Stmt::DefnTm(x, declared_ty, body) => {
            let eager = ctx.extend_typing(x.clone(), declared_ty.clone());
            let synthesized = synthesize_type(body, &eager)?;
            unify_type(&eager, declared_ty, &synthesized)?;
            Ok(eager.extend_closure(Closure::singleton_term(x.clone(), body.clone(), declared_ty.clone())))
        }
        Stmt::DefnTy(x, declared_kind, body) => {
            let eager = ctx.extend_kinding(x.clone(), declared_kind.clone());
            let synthesized = synthesize_kind(body, &eager)?;
            unify_kind(&eager, declared_kind, &synthesized)?;
            Ok(eager.extend_closure(Closure::singleton_type(x.clone(), body.clone(), declared_kind.clone())))
        }
    }
}

/// The final context after elaborating a program, for tests that want
/// to inspect what got bound rather than only whether elaboration
/// succeeded.
pub fn elaborate_program_context(prgm: &Prgm) -> Result<Context, TypeError> {
    let mut ctx = Context::empty();
    for stmt in &prgm.0 {
        ctx = elaborate_stmt(&ctx, stmt)?;
    }
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ast::{Kind, Term, Type};
    use crate::syntax::names::{NameTerm, NameType};

    fn unit() -> Rc<Kind> {
        Rc::new(Kind::Unit)
    }

    #[test]
    fn s1_identity_program_elaborates() {
        let big_x = NameType::new("A");
        let x = NameTerm::new("x");
        let ty = Rc::new(Type::AbsTy(
            big_x.clone(),
            unit(),
            Rc::new(Type::AbsTm(x.clone(), Rc::new(Type::ref_("A")), Rc::new(Type::ref_("A")))),
        ));
        let body = Rc::new(Term::AbsTy(
            big_x,
            unit(),
            Rc::new(Term::AbsTm(x.clone(), Rc::new(Type::ref_("A")), Rc::new(Term::ref_(x)))),
        ));
        let prgm = Prgm::new(vec![Stmt::DefnTm(NameTerm::new("id"), ty, body)]);
        assert!(elaborate_program(&prgm).is_ok());
    }

    #[test]
    fn s3_self_type_program_elaborates() {
        let t = NameType::new("T");
        let iota = Rc::new(Type::Iota(NameTerm::new("x"), Rc::new(Type::ref_("T"))));
        let prgm = Prgm::new(vec![Stmt::DefnTy(t, unit(), iota)]);
        assert!(elaborate_program(&prgm).is_ok());
    }

    #[test]
    fn later_statement_can_reference_earlier_closure_definition() {
        let a = NameType::new("A");
        let prgm = Prgm::new(vec![
            Stmt::DefnTy(a.clone(), unit(), Rc::new(Type::ref_("A"))),
            Stmt::DefnTy(NameType::new("B"), unit(), Rc::new(Type::ref_("A"))),
        ]);
        let ctx = elaborate_program_context(&prgm).unwrap();
        let entry = ctx.lookup_type(&NameType::new("B")).unwrap();
        assert_eq!(entry.value, Some(Rc::new(Type::ref_("A"))));
    }

    #[test]
    fn mismatched_annotation_fails_elaboration() {
        // Declared kind `*`, but the body `\X:*. X` actually has kind
        // `Pi X:*. *` -- annotation and synthesized kind disagree.
        let big_x = NameType::new("X");
        let body = Rc::new(Type::AbsTy(big_x, unit(), Rc::new(Type::ref_("X"))));
        let prgm = Prgm::new(vec![Stmt::DefnTy(NameType::new("A"), unit(), body)]);
        assert!(elaborate_program(&prgm).is_err());
    }
}
