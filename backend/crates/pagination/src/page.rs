//! One page of results plus its continuation cursor.

use crate::{Cursor, PageSize};

/// Items of one page and the cursor that resumes after the last of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T, K> {
    items: Vec<T>,
    next: Option<Cursor<K>>,
}

impl<T, K> Page<T, K> {
    /// Assemble a page from its parts.
    #[must_use]
    pub const fn new(items: Vec<T>, next: Option<Cursor<K>>) -> Self {
        Self { items, next }
    }

    /// Build a page from a result set fetched with one item more than `size`.
    ///
    /// Adapters ask storage for `size + 1` rows; the extra row only proves
    /// that another page exists and is dropped here. When it is present the
    /// cursor points at the last item kept, identified by `key_of`.
    #[must_use]
    pub fn from_overfetch<F>(mut items: Vec<T>, size: PageSize, key_of: F) -> Self
    where
        F: Fn(&T) -> K,
    {
        let has_more = items.len() > size.get();
        items.truncate(size.get());
        let next = if has_more {
            items.last().map(|last| Cursor::new(key_of(last)))
        } else {
            None
        };
        Self { items, next }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Cursor for the following page, if more items may follow.
    #[must_use]
    pub const fn next(&self) -> Option<&Cursor<K>> {
        self.next.as_ref()
    }

    /// Transform each item while keeping the cursor.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U, K>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
        }
    }

    /// Split the page into its items and cursor.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<Cursor<K>>) {
        (self.items, self.next)
    }
}

#[cfg(test)]
mod tests {
    //! Overfetch trimming.
    #![expect(clippy::expect_used, reason = "tests assert on known-good fixtures")]

    use super::*;
    use rstest::rstest;

    fn size(value: usize) -> PageSize {
        PageSize::new(value).expect("positive page size")
    }

    #[rstest]
    fn overfetch_trims_and_points_cursor_at_last_kept_item() {
        let page = Page::from_overfetch(vec![1, 2, 3, 4], size(3), |n| *n);
        assert_eq!(page.items(), &[1, 2, 3]);
        assert_eq!(page.next().map(Cursor::key), Some(&3));
    }

    #[rstest]
    #[case(vec![1, 2, 3])]
    #[case(vec![1])]
    #[case(vec![])]
    fn short_result_has_no_cursor(#[case] items: Vec<i32>) {
        let page = Page::from_overfetch(items, size(3), |n| *n);
        assert!(page.next().is_none());
    }

    #[rstest]
    fn map_preserves_cursor() {
        let page = Page::from_overfetch(vec![1, 2], size(1), |n| *n).map(|n| n * 10);
        let (items, next) = page.into_parts();
        assert_eq!(items, vec![10]);
        assert_eq!(next.map(Cursor::into_key), Some(1));
    }
}
