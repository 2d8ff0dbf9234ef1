// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::Selection;

/// A proposed change to a selection.
///
/// Interaction code never mutates the selection directly; it emits intents and
/// whoever owns the selection applies them through a [`SelectionSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionIntent<T> {
    /// Select exactly this key.
    Replace(T),
    /// Add the key if absent, remove it otherwise.
    Toggle(T),
    /// Add every key between `anchor` and `target` (inclusive) to the
    /// selection.
    ///
    /// `members` is the already-resolved run of keys in the caller's current
    /// ordering. The range is merged into the existing selection, not swapped
    /// in for it.
    Range {
        /// Where the range starts; usually the last plainly clicked key.
        anchor: T,
        /// The key that was shift-clicked.
        target: T,
        /// Keys from `anchor` to `target` inclusive.
        members: Vec<T>,
    },
    /// Deselect everything.
    Clear,
}

/// Something that owns a selection and can apply [`SelectionIntent`]s to it.
///
/// [`Selection`] is the reference implementation; application stores with
/// their own undo or notification machinery implement this directly.
pub trait SelectionSink<T> {
    /// Applies one intent.
    fn apply(&mut self, intent: SelectionIntent<T>);
}

impl<T: PartialEq> SelectionSink<T> for Selection<T> {
    fn apply(&mut self, intent: SelectionIntent<T>) {
        match intent {
            SelectionIntent::Replace(key) => self.select_only(key),
            SelectionIntent::Toggle(key) => self.toggle(key),
            SelectionIntent::Range {
                target, members, ..
            } => {
                self.extend_with(members);
                // The shift-clicked key becomes primary even if it was already
                // selected; the anchor stays put so repeated shift-clicks keep
                // extending from the same place.
                self.add(target);
            }
            SelectionIntent::Clear => self.clear(),
        }
    }
}
