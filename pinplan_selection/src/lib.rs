// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinplan Selection: the selected-pin set and the intents that change it.
//!
//! The canvas only ever *reads* a selection and *proposes* changes to it. The
//! store that owns the selection applies those proposals:
//!
//! - [`Selection`]: keys in stable insertion order, a **primary** key (most
//!   recently interacted with), an **anchor** key (where range selection
//!   starts) and a **revision** counter that changes only when the contents or
//!   roles do.
//! - [`SelectionIntent`]: `Replace`, `Toggle`, `Range` and `Clear`.
//! - [`SelectionSink`]: anything that can apply an intent. [`Selection`]
//!   implements it, so small applications can use it as their store.
//!
//! The crate knows nothing about pins or how they are laid out; range intents
//! carry their resolved members.
//!
//! ## Minimal example
//!
//! ```rust
//! use pinplan_selection::{Selection, SelectionIntent, SelectionSink};
//!
//! let order = ["p1", "p2", "p3", "p4", "p5"];
//! let mut selection = Selection::new();
//!
//! // Click p2, then shift-click p4.
//! selection.apply(SelectionIntent::Replace("p2"));
//! selection.apply(SelectionIntent::Range {
//!     anchor: "p2",
//!     target: "p4",
//!     members: order[1..=3].to_vec(),
//! });
//! assert_eq!(selection.items(), &["p2", "p3", "p4"]);
//!
//! // After a reload, drop keys that no longer exist.
//! selection.retain(|id| *id != "p3");
//! assert_eq!(selection.len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod intent;
mod selection;

pub use intent::{SelectionIntent, SelectionSink};
pub use selection::Selection;
