/*!
 * # Editing Core Module
 *
 * The editing system keeps an abstract, serializable block document in sync
 * with a live editable surface whose native editing primitives know nothing
 * about blocks.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: the block list
 * - The document is an ordered `Vec<Block>`; each block has a kind
 *   (heading, subheading, body, list item), plain-text content, and a set of
 *   whole-block inline styles
 * - Block indices are contiguous from 0 and content never contains line
 *   breaks - a line break always manifests as a block split
 * - Mutation happens exclusively through `Document::apply`, nothing else
 *   writes to the block list
 *
 * ### 2. Command-Based Editing
 * - Raw edit intents arrive as **Commands** (`Cmd` enum): text insertion,
 *   forward/backward deletion, line breaks, style toggles, kind changes
 * - Each command is applied against the current logical selection and
 *   produces a `Patch` describing the intended next caret coordinate
 * - Structural edits (splits, merges, cross-block deletions) are derived
 *   from the command plus selection, never from surface state
 *
 * ### 3. Logical Selection
 * - Selections are pairs of `Caret` coordinates (block index, char offset),
 *   normalized to `start <= end` before any structural operation
 * - The selection is transient: re-derived from the surface before each
 *   edit via the `surface` module's locator, and replaced by the patch
 *   caret afterwards
 *
 * ### 4. Reconciliation
 * - Replacing rendered content invalidates the native caret, so after every
 *   mutation `reconcile` re-places it at the patch's target coordinate
 * - The "what just happened" tag (`EditKind`) travels inside the `Patch`
 *   rather than living as ambient mutable state, so there is no
 *   reset-after-use step to get wrong
 *
 * ## Module Structure
 *
 * - **`document`**: `Block`, `BlockKind`, `StyleSet` and the `Document`
 *   container with its invariant-preserving accessors
 * - **`selection`**: `Caret` and `Selection` with normalization and clamping
 * - **`commands`**: `Cmd` enum and the edit-routing logic for all operations
 * - **`patch`**: edit result carrying the target caret and edit kind
 * - **`reconcile`**: post-render caret restoration against an `EditSurface`
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blockpad_engine::editing::{Cmd, Document, Selection};
 *
 * // 1. A fresh document behaves as a single empty body block
 * let mut doc = Document::new();
 *
 * // 2. Route an edit intent through the current selection
 * let patch = doc.apply(Cmd::InsertText { text: "hello".into() }, &Selection::collapsed(0, 0));
 * assert_eq!(doc.blocks()[0].content, "hello");
 *
 * // 3. The patch tells the reconciler where the caret should land
 * assert_eq!((patch.caret.block, patch.caret.offset), (0, 5));
 * ```
 */

// Module exports
pub mod commands;
pub mod document;
pub mod patch;
pub mod reconcile;
pub mod selection;

// Public API re-exports
pub use commands::Cmd;
pub use document::{Block, BlockKind, Document, InlineStyle, StyleSet};
pub use patch::{EditKind, Patch};
pub use reconcile::reconcile;
pub use selection::{Caret, Selection};
