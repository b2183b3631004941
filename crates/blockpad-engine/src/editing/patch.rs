use crate::editing::Caret;

/// What kind of edit was just applied. Consumed once per render cycle by
/// the selection reconciler to pick the right caret-placement behavior.
/// Carried explicitly in the [`Patch`] instead of living as ambient
/// mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    LineBreak,
    DeleteBackward,
    DeleteForward,
    StyleChange,
}

/// Result of applying a command: the intended next caret coordinate, the
/// kind of edit for the reconciler, and the new document version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub caret: Caret,
    pub kind: EditKind,
    pub version: u64,
}
