//! Contexts and closures.
//!
//! A `Context` is a persistent, leftward-growing stack of `Frame`s,
//! backed by `rpds::List` — the same "cons cell shared immutably"
//! representation a persistent-structure-based checker uses for its
//! context.
//! Cloning a `Context` is an `Rc` bump, not a deep copy, which is what
//! lets the bidirectional checker thread it by value through recursive
//! judgements.

use std::fmt;
use std::rc::Rc;

use rpds::List;

use crate::syntax::ast::{Kind, Term, Type};
use crate::syntax::names::{NameKind, NameTerm, NameType};

/// A block of mutually non-recursive, fully-elaborated definitions
/// bundled into the context as a single frame.
///
/// Closure laws (checked by `semantics::wellformed_closure`, not here):
/// no mutual recursion among the three maps, every bound term is
/// closed, and each bound type's free names lie within earlier entries
/// of the same closure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Closure {
    pub terms: Vec<(NameTerm, Rc<Term>, Rc<Type>)>,
    pub types: Vec<(NameType, Rc<Type>, Rc<Kind>)>,
    pub kinds: Vec<(NameKind, Rc<Kind>)>,
}

impl Closure {
    pub fn new() -> Closure {
        Closure::default()
    }

    pub fn singleton_term(x: NameTerm, term: Rc<Term>, ty: Rc<Type>) -> Closure {
        Closure {
            terms: vec![(x, term, ty)],
            types: Vec::new(),
            kinds: Vec::new(),
        }
    }

    pub fn singleton_type(x: NameType, ty: Rc<Type>, kind: Rc<Kind>) -> Closure {
        Closure {
            terms: Vec::new(),
            types: vec![(x, ty, kind)],
            kinds: Vec::new(),
        }
    }

    fn lookup_term(&self, x: &NameTerm) -> Option<(Rc<Term>, Rc<Type>)> {
        self.terms
            .iter()
            .find(|(y, _, _)| y == x)
            .map(|(_, term, ty)| (term.clone(), ty.clone()))
    }

    fn lookup_type(&self, x: &NameType) -> Option<(Rc<Type>, Rc<Kind>)> {
        self.types
            .iter()
            .find(|(y, _, _)| y == x)
            .map(|(_, ty, kind)| (ty.clone(), kind.clone()))
    }

    fn lookup_kind(&self, x: &NameKind) -> Option<Rc<Kind>> {
        self.kinds
            .iter()
            .find(|(y, _)| y == x)
            .map(|(_, kind)| kind.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Frame {
    Typing(NameTerm, Rc<Type>),
    Kinding(NameType, Rc<Kind>),
    Closure(Rc<Closure>),
}

/// A read-only view of a context's innermost frame, for callers (the
/// well-formedness judgements) that need to walk frame-by-frame without
/// reaching into `Frame` itself.
pub enum ContextView {
    Typing(NameTerm, Rc<Type>),
    Kinding(NameType, Rc<Kind>),
    Closure(Rc<Closure>),
}

impl From<&Frame> for ContextView {
    fn from(frame: &Frame) -> ContextView {
        match frame {
            Frame::Typing(x, t) => ContextView::Typing(x.clone(), t.clone()),
            Frame::Kinding(x, k) => ContextView::Kinding(x.clone(), k.clone()),
            Frame::Closure(c) => ContextView::Closure(c.clone()),
        }
    }
}

/// The result of looking up a term-name: the value it was bound to (if
/// any — only `Closure` frames carry one) and its type.
pub struct TermEntry {
    pub value: Option<Rc<Term>>,
    pub ty: Rc<Type>,
}

/// The result of looking up a type-name: the value it was bound to (if
/// any) and its kind.
pub struct TypeEntry {
    pub value: Option<Rc<Type>>,
    pub kind: Rc<Kind>,
}

/// A finite stack of typing/kinding/closure frames.
///
/// Lookup walks frames innermost-first; a `Closure` frame consults its
/// own maps before falling through to its tail, so a later top-level
/// definition correctly shadows an earlier one of the same name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context(List<Frame>);

impl Context {
    pub fn empty() -> Context {
        Context(List::new())
    }

    pub fn extend_typing(&self, x: NameTerm, ty: Rc<Type>) -> Context {
        Context(self.0.push_front(Frame::Typing(x, ty)))
    }

    pub fn extend_kinding(&self, x: NameType, kind: Rc<Kind>) -> Context {
        Context(self.0.push_front(Frame::Kinding(x, kind)))
    }

    pub fn extend_closure(&self, closure: Closure) -> Context {
        Context(self.0.push_front(Frame::Closure(Rc::new(closure))))
    }

    pub fn lookup_term(&self, x: &NameTerm) -> Option<TermEntry> {
        for frame in self.0.iter() {
            match frame {
                Frame::Typing(y, ty) if y == x => {
                    return Some(TermEntry {
                        value: None,
                        ty: ty.clone(),
                    })
                }
                Frame::Closure(closure) => {
                    if let Some((term, ty)) = closure.lookup_term(x) {
                        return Some(TermEntry {
                            value: Some(term),
                            ty,
                        });
                    }
                }
                Frame::Typing(_, _) | Frame::Kinding(_, _) => {}
            }
        }
        None
    }

    pub fn lookup_type(&self, x: &NameType) -> Option<TypeEntry> {
        for frame in self.0.iter() {
            match frame {
                Frame::Kinding(y, kind) if y == x => {
                    return Some(TypeEntry {
                        value: None,
                        kind: kind.clone(),
                    })
                }
                Frame::Closure(closure) => {
                    if let Some((ty, kind)) = closure.lookup_type(x) {
                        return Some(TypeEntry {
                            value: Some(ty),
                            kind,
                        });
                    }
                }
                Frame::Typing(_, _) | Frame::Kinding(_, _) => {}
            }
        }
        None
    }

    pub fn lookup_kind(&self, x: &NameKind) -> Option<Rc<Kind>> {
        for frame in self.0.iter() {
            if let Frame::Closure(closure) = frame {
                if let Some(kind) = closure.lookup_kind(x) {
                    return Some(kind);
                }
            }
        }
        None
    }

    /// The innermost frame and the tail context beneath it, or `None` for
    /// an empty context. Lets `semantics::check`'s well-formedness
    /// judgements recurse over a context's structure without this module
    /// exposing `Frame` itself.
    pub fn peek(&self) -> Option<(ContextView, Context)> {
        let frame = self.0.first()?;
        Some((ContextView::from(frame), Context(self.0.drop_first()?)))
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::empty()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, frame) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match frame {
                Frame::Typing(x, ty) => write!(f, "{} : {}", x, ty)?,
                Frame::Kinding(x, kind) => write!(f, "{} :: {}", x, kind)?,
                Frame::Closure(closure) => {
                    write!(f, "{{")?;
                    for (x, _, ty) in &closure.terms {
                        write!(f, "{} = _ : {}; ", x, ty)?;
                    }
                    for (x, _, kind) in &closure.types {
                        write!(f, "{} = _ :: {}; ", x, kind)?;
                    }
                    write!(f, "}}")?;
                }
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_innermost_first() {
        let ctx = Context::empty()
            .extend_typing(NameTerm::new("x"), Rc::new(Type::ref_("A")))
            .extend_typing(NameTerm::new("x"), Rc::new(Type::ref_("B")));

        let entry = ctx.lookup_term(&NameTerm::new("x")).unwrap();
        assert_eq!(*entry.ty, Type::ref_("B"));
        assert!(entry.value.is_none());
    }

    #[test]
    fn closure_shadows_earlier_typing_frame() {
        let base = Context::empty().extend_typing(NameTerm::new("x"), Rc::new(Type::ref_("A")));
        let shadowed = base.extend_closure(Closure::singleton_term(
            NameTerm::new("x"),
            Rc::new(Term::ref_("e")),
            Rc::new(Type::ref_("A")),
        ));

        let entry = shadowed.lookup_term(&NameTerm::new("x")).unwrap();
        assert_eq!(entry.value, Some(Rc::new(Term::ref_("e"))));
    }

    #[test]
    fn undeclared_name_is_none() {
        let ctx = Context::empty();
        assert!(ctx.lookup_term(&NameTerm::new("x")).is_none());
        assert!(ctx.lookup_type(&NameType::new("X")).is_none());
        assert!(ctx.lookup_kind(&NameKind::new("K")).is_none());
    }
}
