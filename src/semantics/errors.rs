//! Error types.
//!
//! `TypeError` covers every fatal-to-the-statement failure the
//! bidirectional checker can produce. `InternalError` covers the
//! reducer's "this should be impossible in a sound checker" failures:
//! they only surface if `unify`/`evaluate` is asked to reduce an
//! ill-typed expression, which a correctly-driven checker never does,
//! so their presence in a real run is itself a soundness bug.

use thiserror::Error;

use crate::syntax::{NameTerm, NameType};

/// A bug-surfacing failure from the reducer: the checker asked to
/// reduce an application whose function position did not evaluate to
/// an abstraction of the expected shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error("applied a non-function term `{0}` in a term-term application")]
    AppliedNonFunctionInTermTerm(String),
    #[error("applied a non-function term `{0}` in a term-type application")]
    AppliedNonFunctionInTermType(String),
    #[error("applied a non-function type `{0}` in a type-term application")]
    AppliedNonFunctionInTypeTerm(String),
    #[error("applied a non-function type `{0}` in a type-type application")]
    AppliedNonFunctionInTypeType(String),
}

/// A checked-judgement failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("undeclared term name: {0}")]
    UndeclaredTermName(NameTerm),

    #[error("undeclared type name: {0}")]
    UndeclaredTypeName(NameType),

    #[error("invalid term-term applicant: `{0}` does not synthesize a dependent function type")]
    InvalidTermTermApplicant(String),

    #[error("invalid term-type applicant: `{0}` does not synthesize a type-abstraction type")]
    InvalidTermTypeApplicant(String),

    #[error("invalid type-term applicant: `{0}` does not synthesize a term-abstraction kind")]
    InvalidTypeTermApplicant(String),

    #[error("invalid type-type applicant: `{0}` does not synthesize a type-abstraction kind")]
    InvalidTypeTypeApplicant(String),

    #[error(
        "cannot unify subexpression {inner_left} with {inner_right}, \
         in order to unify expression {outer_left} with {outer_right}"
    )]
    Mismatch {
        inner_left: String,
        inner_right: String,
        outer_left: String,
        outer_right: String,
    },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl TypeError {
    pub fn mismatch(
        inner_left: impl ToString,
        inner_right: impl ToString,
        outer_left: impl ToString,
        outer_right: impl ToString,
    ) -> TypeError {
        TypeError::Mismatch {
            inner_left: inner_left.to_string(),
            inner_right: inner_right.to_string(),
            outer_left: outer_left.to_string(),
            outer_right: outer_right.to_string(),
        }
    }
}
