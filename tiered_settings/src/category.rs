// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categories and category sets.
//!
//! Every property belongs to exactly one [`Category`]. Stores partition their
//! entries by category for persistence, and report unsaved changes as a
//! [`CategorySet`].

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

/// A persistence partition for properties.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Behavioral settings.
    Settings,
    /// Visual appearance.
    Theme,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 2] = [Self::Settings, Self::Theme];

    /// Returns the lower-case name used in labels and file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Theme => "theme",
        }
    }

    /// Parses a lower-case category name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Converts this category into a single-element [`CategorySet`].
    #[must_use]
    pub const fn into_set(self) -> CategorySet {
        CategorySet(1 << self as u8)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compact set of categories.
///
/// Iteration follows [`Category::ALL`] order regardless of insertion order,
/// which keeps unsaved-state reports stable.
///
/// # Example
///
/// ```
/// use tiered_settings::{Category, CategorySet};
///
/// let mut set = CategorySet::empty();
/// set.insert(Category::Theme);
/// set.insert(Category::Settings);
///
/// let order: Vec<_> = set.iter().collect();
/// assert_eq!(order, [Category::Settings, Category::Theme]);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u8);

impl CategorySet {
    /// An empty set.
    pub const EMPTY: Self = Self(0);

    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Returns `true` if this set contains no categories.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this set contains `category`.
    #[must_use]
    pub const fn contains(self, category: Category) -> bool {
        self.0 & (1 << category as u8) != 0
    }

    /// Inserts a category.
    pub fn insert(&mut self, category: Category) {
        self.0 |= 1 << category as u8;
    }

    /// Removes a category.
    pub fn remove(&mut self, category: Category) {
        self.0 &= !(1 << category as u8);
    }

    /// Removes every category.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Returns the number of categories in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns an iterator over the categories in declaration order.
    #[must_use]
    pub const fn iter(self) -> CategorySetIter {
        CategorySetIter { set: self, next: 0 }
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for CategorySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CategorySet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        category.into_set()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = Self::empty();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl IntoIterator for CategorySet {
    type Item = Category;
    type IntoIter = CategorySetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the categories in a [`CategorySet`].
#[derive(Clone, Debug)]
pub struct CategorySetIter {
    set: CategorySet,
    next: usize,
}

impl Iterator for CategorySetIter {
    type Item = Category;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&category) = Category::ALL.get(self.next) {
            self.next += 1;
            if self.set.contains(category) {
                return Some(category);
            }
        }
        None
    }
}
