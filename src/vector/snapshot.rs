use std::sync::Arc;

/// ### -> `Snapshot<T>` - A frozen, read-only view of one backing store.
///
/// A snapshot shares ownership of the backing store that was current at the
/// instant it was captured. Its contents never change, no matter how the
/// originating container is mutated afterwards, and it stays valid after the
/// container is dropped. The store it references is freed once the last
/// snapshot, iterator, or container holding it is gone.
///
/// Access comes in the same two tiers as the container: unchecked indexing
/// (`snapshot[i]`, panics on misuse like slice indexing) and checked
/// [`at`](Snapshot::at) (returns an error for an out-of-range index).
///
/// Cloning a snapshot copies the handle, not the store.
pub struct Snapshot<T> {
    store: Arc<Vec<T>>,
}

impl<T> Snapshot<T> {
    pub(crate) fn capture(store: Arc<Vec<T>>) -> Self {
        Self { store }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Checks whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the capacity of the captured store.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Gets the `index`-th element, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.store.get(index)
    }

    /// Gets the `index`-th element with bounds checking.
    pub fn at(&self, index: usize) -> anyhow::Result<&T> {
        self.store.get(index).ok_or_else(|| {
            anyhow::anyhow!(
                "Index {} out of bounds for snapshot of length {}. 'at' can only access existing indexes.",
                index,
                self.store.len()
            )
        })
    }

    /// Gets the first element, or `None` when empty.
    pub fn front(&self) -> Option<&T> {
        self.store.first()
    }

    /// Gets the last element, or `None` when empty.
    pub fn back(&self) -> Option<&T> {
        self.store.last()
    }

    /// Views the captured store as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.store
    }

    /// Iterates the captured store by reference.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.store.iter()
    }

    /// Materializes the captured store into an independent `Vec<T>`.
    #[must_use = "Materialized contents must have a purpose!"]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.store.as_ref().clone()
    }

    /// Checks whether two snapshots reference the same backing store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T> std::ops::Index<usize> for Snapshot<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.store[index]
    }
}

impl<T> std::fmt::Debug for Snapshot<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.store.iter()).finish()
    }
}

impl<T> PartialEq for Snapshot<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Snapshot<T>
where
    T: Clone,
{
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let back = self.store.len();
        IntoIter {
            store: self.store,
            front: 0,
            back,
        }
    }
}

/// An owning double-ended cursor over one backing store.
///
/// The iterator holds its own share of the store (cursor plus shared store
/// reference), so it stays dereferenceable even after the snapshot it came
/// from, or the originating container, is gone.
pub struct IntoIter<T> {
    store: Arc<Vec<T>>,
    front: usize,
    back: usize,
}

impl<T> Iterator for IntoIter<T>
where
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = self.store[self.front].clone();
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.front = self.back.min(self.front.saturating_add(n));
        self.next()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T>
where
    T: Clone,
{
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.store[self.back].clone())
    }
}

impl<T> ExactSizeIterator for IntoIter<T> where T: Clone {}

impl<T> std::iter::FusedIterator for IntoIter<T> where T: Clone {}
