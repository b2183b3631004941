pub mod editing;
pub mod surface;

// Re-export key types for easier usage
pub use editing::{
    Block, BlockKind, Caret, Cmd, Document, EditKind, InlineStyle, Patch, Selection, StyleSet,
    reconcile,
};
pub use surface::{EditSurface, HeadlessSurface, RawSelection, locate_selection};
