//! One-step weak-head reduction and its fixed-point driver.
//!
//! `reduce_*` performs a single step of weak-head β/δ reduction;
//! `evaluate_*` iterates it to a fixed point, i.e. weak head normal
//! form. Kinds never reduce: there is no `reduce_kind`.

use std::rc::Rc;

use crate::semantics::errors::InternalError;
use crate::syntax::ast::{Term, Type};
use crate::syntax::context::Context;
use crate::syntax::subst::{subst_term_in_term, subst_term_in_type, subst_type_in_term, subst_type_in_type};

/// One step of weak-head reduction of a term.
///
/// `Term::Ref`'s lookup failing is not an error here: it just means
/// there is no further reduction available (the name is a bound
/// variable, not a closure-defined one). Only a malformed application
/// head, an applicant that after being reduced to whnf is still not the
/// expected abstraction shape, is an [`InternalError`], since a
/// well-typed program never reaches that branch.
pub fn reduce_term(ctx: &Context, term: &Rc<Term>) -> Result<Option<Rc<Term>>, InternalError> {
    match &**term {
        Term::Ref(x) => Ok(ctx.lookup_term(x).and_then(|entry| entry.value)),

        Term::AppTm(fn_expr, arg) => {
            let fn_whnf = evaluate_term(ctx, fn_expr)?;
            match &*fn_whnf {
                Term::AbsTm(x, _, body) => {
                    log::trace!("beta-reducing term-term application at {}", x);
                    Ok(Some(subst_term_in_term(x, arg, body)))
                }
                _ => Err(InternalError::AppliedNonFunctionInTermTerm(fn_whnf.to_string())),
            }
        }

        Term::AppTy(fn_expr, arg) => {
            let fn_whnf = evaluate_term(ctx, fn_expr)?;
            match &*fn_whnf {
                Term::AbsTy(x, _, body) => {
                    log::trace!("beta-reducing term-type application at {}", x);
                    Ok(Some(subst_type_in_term(x, arg, body)))
                }
                _ => Err(InternalError::AppliedNonFunctionInTermType(fn_whnf.to_string())),
            }
        }

        // Already in whnf.
        Term::AbsTm(_, _, _) | Term::AbsTy(_, _, _) => Ok(None),
    }
}

/// Evaluate a term to its weak head normal form.
pub fn evaluate_term(ctx: &Context, term: &Rc<Term>) -> Result<Rc<Term>, InternalError> {
    let mut current = term.clone();
    while let Some(next) = reduce_term(ctx, &current)? {
        current = next;
    }
    Ok(current)
}

/// One step of weak-head reduction of a type.
pub fn reduce_type(ctx: &Context, ty: &Rc<Type>) -> Result<Option<Rc<Type>>, InternalError> {
    match &**ty {
        Type::Ref(x) => Ok(ctx.lookup_type(x).and_then(|entry| entry.value)),

        Type::AppTm(fn_ty, arg) => {
            let fn_whnf = evaluate_type(ctx, fn_ty)?;
            match &*fn_whnf {
                Type::AbsTm(x, _, body) => {
                    log::trace!("beta-reducing type-term application at {}", x);
                    Ok(Some(subst_term_in_type(x, arg, body)))
                }
                _ => Err(InternalError::AppliedNonFunctionInTypeTerm(fn_whnf.to_string())),
            }
        }

        Type::AppTy(fn_ty, arg) => {
            let fn_whnf = evaluate_type(ctx, fn_ty)?;
            match &*fn_whnf {
                Type::AbsTy(x, _, body) => {
                    log::trace!("beta-reducing type-type application at {}", x);
                    Ok(Some(subst_type_in_type(x, arg, body)))
                }
                _ => Err(InternalError::AppliedNonFunctionInTypeType(fn_whnf.to_string())),
            }
        }

        // Already in whnf.
        Type::AbsTm(_, _, _) | Type::AbsTy(_, _, _) | Type::Iota(_, _) => Ok(None),
    }
}

/// Evaluate a type to its weak head normal form.
pub fn evaluate_type(ctx: &Context, ty: &Rc<Type>) -> Result<Rc<Type>, InternalError> {
    let mut current = ty.clone();
    while let Some(next) = reduce_type(ctx, &current)? {
        current = next;
    }
    Ok(current)
}
