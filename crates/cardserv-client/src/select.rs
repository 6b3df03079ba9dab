// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Picking one resource out of a listing.
//
// The demo workflow simply takes the first entry of each list.  That is a
// convenience for walkthroughs, not a rule: real integrations should choose
// by name or id with `select_where`.

/// First element, or `None` for an empty listing.
pub fn select_first<T>(items: Vec<T>) -> Option<T> {
    items.into_iter().next()
}

/// First element matching `predicate`.
pub fn select_where<T>(items: Vec<T>, predicate: impl FnMut(&T) -> bool) -> Option<T> {
    items.into_iter().find(predicate)
}
