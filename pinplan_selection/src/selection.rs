// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// The set of selected keys plus primary/anchor roles and a revision counter.
///
/// Keys are kept in insertion order in a `Vec<T>` and uniqueness is enforced by
/// equality, so `T` only needs `PartialEq` for most operations. The order is
/// stable for a given instance, which keeps anything derived from it (culling
/// output, frame plans) deterministic.
#[derive(Clone, Debug, Default)]
pub struct Selection<T> {
    items: Vec<T>,
    primary: Option<usize>,
    anchor: Option<usize>,
    revision: u64,
}

impl<T> Selection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            primary: None,
            anchor: None,
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// All selected keys, in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterates the selected keys.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The most recently interacted-with selected key, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&T> {
        self.primary.and_then(|idx| self.items.get(idx))
    }

    /// The key range selection extends from, if it is still selected.
    #[must_use]
    pub fn anchor(&self) -> Option<&T> {
        self.anchor.and_then(|idx| self.items.get(idx))
    }

    /// Counter bumped on every change to the contents, primary or anchor.
    ///
    /// No-op mutations leave it untouched, so observers can use it as a cache
    /// key without comparing contents.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        if self.items.is_empty() && self.primary.is_none() && self.anchor.is_none() {
            return;
        }
        self.items.clear();
        self.primary = None;
        self.anchor = None;
        self.touch();
    }

    /// Keeps only the keys for which `keep` returns `true`.
    ///
    /// This is how stale keys are pruned after the underlying collection is
    /// reloaded. Primary and anchor follow their keys and are dropped with
    /// them.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let before = self.items.len();
        let mut kept = 0;
        let mut primary = None;
        let mut anchor = None;
        let mut idx = 0;
        self.items.retain(|item| {
            let keep_it = keep(item);
            if keep_it {
                if self.primary == Some(idx) {
                    primary = Some(kept);
                }
                if self.anchor == Some(idx) {
                    anchor = Some(kept);
                }
                kept += 1;
            }
            idx += 1;
            keep_it
        });
        if self.items.len() != before {
            self.primary = primary;
            self.anchor = anchor;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.index_of(key).is_some()
    }

    /// Selects exactly `key`, making it primary and anchor.
    pub fn select_only(&mut self, key: T) {
        let unchanged = matches!(self.items.as_slice(), [only] if *only == key)
            && self.primary == Some(0)
            && self.anchor == Some(0);
        if unchanged {
            return;
        }
        self.items.clear();
        self.items.push(key);
        self.primary = Some(0);
        self.anchor = Some(0);
        self.touch();
    }

    /// Selects exactly the given keys, ignoring duplicates.
    ///
    /// The first key becomes primary. The anchor survives if its key is still
    /// selected, otherwise it moves to the first key.
    pub fn replace_with<I: IntoIterator<Item = T>>(&mut self, keys: I) {
        let mut items: Vec<T> = Vec::new();
        for key in keys {
            if !items.contains(&key) {
                items.push(key);
            }
        }
        self.install(items);
    }

    /// Adds the given keys to the selection, ignoring ones already present.
    ///
    /// The last newly added key becomes primary; the anchor is unchanged.
    pub fn extend_with<I: IntoIterator<Item = T>>(&mut self, keys: I) {
        let before = self.items.len();
        for key in keys {
            if !self.contains(&key) {
                self.items.push(key);
            }
        }
        if self.items.len() != before {
            self.primary = Some(self.items.len() - 1);
            self.touch();
        }
    }

    /// Adds `key` if absent and makes it primary.
    pub fn add(&mut self, key: T) {
        let idx = match self.index_of(&key) {
            Some(idx) => idx,
            None => {
                self.items.push(key);
                self.items.len() - 1
            }
        };
        if self.primary != Some(idx) {
            self.primary = Some(idx);
            self.touch();
        }
    }

    /// Deselects `key` if it is selected.
    pub fn remove(&mut self, key: &T) {
        if let Some(idx) = self.index_of(key) {
            self.remove_index(idx);
            self.touch();
        }
    }

    /// Flips the membership of `key`.
    ///
    /// A newly added key becomes primary and anchor; removing a key drops
    /// whichever roles it held.
    pub fn toggle(&mut self, key: T) {
        match self.index_of(&key) {
            Some(idx) => self.remove_index(idx),
            None => {
                self.items.push(key);
                let idx = self.items.len() - 1;
                self.primary = Some(idx);
                self.anchor = Some(idx);
            }
        }
        self.touch();
    }

    /// Makes an already selected `key` the anchor.
    pub fn set_anchor(&mut self, key: &T) {
        if let Some(idx) = self.index_of(key)
            && self.anchor != Some(idx)
        {
            self.anchor = Some(idx);
            self.touch();
        }
    }

    fn index_of(&self, key: &T) -> Option<usize> {
        self.items.iter().position(|k| k == key)
    }

    fn install(&mut self, items: Vec<T>) {
        let primary = (!items.is_empty()).then_some(0);
        let anchor = self
            .anchor()
            .and_then(|old| items.iter().position(|k| k == old))
            .or(primary);
        if items == self.items && primary == self.primary && anchor == self.anchor {
            return;
        }
        self.items = items;
        self.primary = primary;
        self.anchor = anchor;
        self.touch();
    }

    fn remove_index(&mut self, idx: usize) {
        self.items.remove(idx);
        for role in [&mut self.primary, &mut self.anchor] {
            *role = match *role {
                Some(i) if i == idx => None,
                Some(i) if i > idx => Some(i - 1),
                other => other,
            };
        }
    }
}

#[cfg(feature = "hashbrown")]
impl<T> Selection<T>
where
    T: core::hash::Hash + Eq + Clone,
{
    /// Like [`Selection::replace_with`], but de-duplicates through a hash set,
    /// which is linear instead of quadratic in the batch size.
    ///
    /// First-occurrence order is preserved.
    pub fn replace_with_hashed<I: IntoIterator<Item = T>>(&mut self, keys: I) {
        let iter = keys.into_iter();
        let (lower, _) = iter.size_hint();
        let mut seen = hashbrown::HashSet::with_capacity(lower);
        let mut items = Vec::with_capacity(lower);
        for key in iter {
            if seen.insert(key.clone()) {
                items.push(key);
            }
        }
        self.install(items);
    }

    /// Like [`Selection::extend_with`], but checks membership through a hash
    /// set built from the current contents.
    pub fn extend_with_hashed<I: IntoIterator<Item = T>>(&mut self, keys: I) {
        let mut seen: hashbrown::HashSet<T> = self.items.iter().cloned().collect();
        let before = self.items.len();
        for key in keys {
            if seen.insert(key.clone()) {
                self.items.push(key);
            }
        }
        if self.items.len() != before {
            self.primary = Some(self.items.len() - 1);
            self.touch();
        }
    }
}
