// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Insertion-ordered name collections.

use std::collections::BTreeSet;

use smol_str::SmolStr;

/// A deduplicating set of names that iterates in insertion order.
///
/// Event and action collections must come out of analysis in the order the
/// source declared them, so recompiling a file reproduces byte-identical
/// output. A plain `BTreeSet` would sort alphabetically and a `HashSet`
/// would not be stable at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    ordered: Vec<SmolStr>,
    seen: BTreeSet<SmolStr>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` unless it is already present. Returns whether it was new.
    pub fn insert(&mut self, name: impl Into<SmolStr>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.ordered.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SmolStr> {
        self.ordered.iter()
    }

    pub fn to_vec(&self) -> Vec<SmolStr> {
        self.ordered.clone()
    }
}

impl<'a> IntoIterator for &'a NameSet {
    type Item = &'a SmolStr;
    type IntoIter = std::slice::Iter<'a, SmolStr>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}
