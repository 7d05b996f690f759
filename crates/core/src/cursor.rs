//! Non-empty selection cursor over an ordered list.
//!
//! A [`FocusCursor`] partitions a list into the elements before the focus,
//! the focused (selected) element, and the elements after it. The storefront
//! uses one cursor for "product currently on the detail view" and one per
//! product for "variant currently chosen by the shopper".
//!
//! Invariants:
//! - `before ++ [selected] ++ after` is always the original list, in order.
//! - There is always exactly one selected element; a cursor is never empty.

use serde::{Deserialize, Serialize};

/// A non-empty ordered sequence with exactly one selected element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusCursor<T> {
    before: Vec<T>,
    selected: T,
    after: Vec<T>,
}

impl<T> FocusCursor<T> {
    /// A cursor over a single element, which is selected.
    #[must_use]
    pub const fn singleton(item: T) -> Self {
        Self {
            before: Vec::new(),
            selected: item,
            after: Vec::new(),
        }
    }

    /// Build a cursor with the first element selected.
    ///
    /// Returns `None` for an empty list: a cursor over zero elements cannot
    /// exist.
    #[must_use]
    pub fn from_list(items: Vec<T>) -> Option<Self> {
        let mut items = items.into_iter();
        let selected = items.next()?;
        Some(Self {
            before: Vec::new(),
            selected,
            after: items.collect(),
        })
    }

    /// Build a cursor with the first element selected, falling back to a
    /// single `placeholder` element when `items` is empty.
    #[must_use]
    pub fn from_list_or(items: Vec<T>, placeholder: T) -> Self {
        Self::from_list(items).unwrap_or_else(|| Self::singleton(placeholder))
    }

    /// Like [`from_list_or`](Self::from_list_or) with a lazily built placeholder.
    #[must_use]
    pub fn from_list_or_else(items: Vec<T>, placeholder: impl FnOnce() -> T) -> Self {
        Self::from_list(items).unwrap_or_else(|| Self::singleton(placeholder()))
    }

    /// Move the focus to the first element (in list order) matching
    /// `predicate`.
    ///
    /// All other elements keep their relative order. When nothing matches the
    /// cursor is returned unchanged.
    #[must_use]
    pub fn select_by(self, mut predicate: impl FnMut(&T) -> bool) -> Self {
        let Some(index) = self.iter().position(|item| predicate(item)) else {
            return self;
        };

        let Self {
            mut before,
            selected,
            mut after,
        } = self;

        match index.cmp(&before.len()) {
            std::cmp::Ordering::Equal => Self {
                before,
                selected,
                after,
            },
            std::cmp::Ordering::Less => {
                // Target sits in `before`: everything from it onwards moves right.
                let mut tail = before.split_off(index);
                let focus = tail.remove(0);
                tail.push(selected);
                tail.append(&mut after);
                Self {
                    before,
                    selected: focus,
                    after: tail,
                }
            }
            std::cmp::Ordering::Greater => {
                let offset = index - before.len() - 1;
                let mut tail = after.split_off(offset);
                let focus = tail.remove(0);
                before.push(selected);
                before.append(&mut after);
                Self {
                    before,
                    selected: focus,
                    after: tail,
                }
            }
        }
    }

    /// The selected element.
    #[must_use]
    pub const fn selected(&self) -> &T {
        &self.selected
    }

    /// Elements before the selected one, in list order.
    #[must_use]
    pub fn before(&self) -> &[T] {
        &self.before
    }

    /// Elements after the selected one, in list order.
    #[must_use]
    pub fn after(&self) -> &[T] {
        &self.after
    }

    /// Index of the selected element in the full list.
    #[must_use]
    pub fn position(&self) -> usize {
        self.before.len()
    }

    /// Number of elements, always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.before.len() + 1 + self.after.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all elements in list order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.before
            .iter()
            .chain(std::iter::once(&self.selected))
            .chain(self.after.iter())
    }

    /// Reassemble the full list in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        let mut items = self.before;
        items.reserve(1 + self.after.len());
        items.push(self.selected);
        items.extend(self.after);
        items
    }
}
