use crate::editing::{EditKind, Patch};
use crate::surface::EditSurface;

/// Re-place the native caret after a mutation has been re-rendered.
///
/// Runs once per document update. The edit router already computed the
/// exact target coordinate for every operation (including the pre-merge
/// seam on backward merges), so there is no placement arithmetic left
/// here: the patch's edit kind only decides whether the editable region
/// needs refocusing first. Kind and style changes come from controls that
/// live outside the editable region, which steal keyboard focus.
///
/// Placement failure means the target block's node no longer exists; the
/// user keeps whatever caret the surface defaulted to. That is a degraded
/// caret, never an error.
pub fn reconcile<S: EditSurface>(surface: &mut S, patch: &Patch) {
    if patch.kind == EditKind::StyleChange {
        surface.focus();
    }
    let _ = surface.place_caret(patch.caret);
}
