use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::Mutex;

mod codec;
mod policy;
mod snapshot;

use policy::{Amortized, StorePolicy};
use snapshot::Snapshot;

/// ### -> `CowVec<T>` - A snapshot-isolated, copy-on-write concurrent vector.
///
/// `CowVec<T>` is a reference-counted dynamic array that allows wait-free,
/// always-valid iteration concurrently with mutation from other tasks or
/// threads. No published backing store is ever mutated in place: every
/// mutating operation copies the current store, applies the change to the
/// copy, and atomically publishes the copy as the new current store.
///
/// ### -> `Architecture`
///
/// Internally the container composes three parts:
///
/// - **Backing store**: a plain `Vec<T>`, immutable once published.
/// - **Shared handle**: an [`arc_swap::ArcSwap`] designating the current
///   backing store. Readers copy the handle (an atomic refcount increment)
///   and writers replace it (an atomic pointer swap); a reader's copy is safe
///   even while a writer's publish is in flight.
/// - **Mutation serializer**: a per-instance [`tokio::sync::Mutex`] held only
///   for the copy-mutate-publish sequence. It serializes writers on the same
///   instance and is never touched by readers.
///
/// ### -> `Snapshot Isolation`
///
/// [`lock`](CowVec::lock) returns a [`Snapshot`]: an independently-owned,
/// frozen read view of the store current at the instant of the call. A
/// snapshot's contents never change, regardless of subsequent mutations to
/// (or destruction of) the originating container. Iterators obtained from a
/// snapshot hold their own share of the backing store and remain valid even
/// after the snapshot itself is dropped.
///
/// ### -> `Consistency Guarantees`
///
/// - Mutations on one instance are totally ordered by serializer acquisition.
/// - A read observes either the pre- or the post-mutation store, never a mix
///   and never a torn or partially-mutated store.
/// - A panic during the copy step (for example from an element `Clone`)
///   aborts the mutation before publish and leaves the prior store published
///   and intact (strong exception safety).
///
/// ### -> `Cost Model`
///
/// Reads are lock-free and O(1) to snapshot; every mutation pays an O(n) copy
/// of the store. This is a deliberate trade favoring many concurrent cheap
/// readers over few writers. Search-based mutators (`replace`, `erase`,
/// the `*_if` forms, `push_back_if_absent`) probe the current store first and
/// skip the copy entirely when the operation would be a no-op; the bulk
/// `*_all` forms defer the copy until the first match.
///
/// The capacity of every freshly allocated store is chosen by the
/// [`StorePolicy`] supplied at construction (default: [`Amortized`], which
/// reuses the growth curve of one backing store generation for the next).
///
/// ### -> `Access Tiers`
///
/// Two deliberate tiers, matching conventional array-container contracts:
/// checked access through [`at`](CowVec::at) (returns an error for an
/// out-of-range index), and unchecked access through snapshot indexing and
/// the index-based mutators (`insert_at`, `replace_at`, `erase_at`,
/// `erase_range`), which panic on misuse exactly like slice indexing.
///
/// ### -> `Usage`
///
/// ```
/// use snapvec::vector::prelude::*;
///
/// async fn example() -> anyhow::Result<()> {
///     let vector = CowVec::from(vec![2, 3, 5, 7, 11, 13]);
///
///     let snapshot = vector.lock();
///
///     for (index, prime) in snapshot.iter().enumerate() {
///         // mutating while scanning is fine; the snapshot is frozen.
///         vector.push_back(prime * 100).await;
///         assert_eq!(snapshot[index], *prime);
///     }
///
///     assert_eq!(snapshot.len(), 6);
///     assert_eq!(vector.len(), 12);
///
///     Ok(())
/// }
///
/// snapvec::future!(example());
/// ```
pub struct CowVec<T> {
    store: ArcSwap<Vec<T>>,
    serializer: Mutex<()>,
    policy: Arc<dyn StorePolicy>,
}

impl<T> CowVec<T>
where
    T: Send + Sync + 'static,
{
    /// Constructs an empty container with the default [`Amortized`] policy.
    pub fn new() -> Self {
        Self::with_policy(Arc::new(Amortized))
    }

    /// Constructs an empty container with the given store policy. The policy
    /// is propagated to every freshly allocated backing store.
    pub fn with_policy(policy: Arc<dyn StorePolicy>) -> Self {
        Self {
            store: ArcSwap::from_pointee(Vec::new()),
            serializer: Mutex::new(()),
            policy,
        }
    }

    /// Constructs a container holding `count` copies of `value`.
    pub fn filled(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from(vec![value; count])
    }

    /// ### -> `lock`
    ///
    /// Gets a [`Snapshot`] of the current backing store.
    ///
    /// Despite the conventional name this takes no lock: it is a cheap
    /// atomic handle copy and never blocks, not even against a concurrent
    /// writer mid-publish.
    ///
    /// ```
    /// use snapvec::vector::prelude::*;
    ///
    /// async fn example() -> anyhow::Result<()> {
    ///     let vector = CowVec::from(vec![1, 2, 3]);
    ///     let snapshot = vector.lock();
    ///     vector.clear().await;
    ///     assert_eq!(snapshot.to_vec(), vec![1, 2, 3]);
    ///     assert!(vector.is_empty());
    ///     Ok(())
    /// }
    ///
    /// snapvec::future!(example());
    /// ```
    #[must_use = "Snapshots must serve a purpose!"]
    pub fn lock(&self) -> Snapshot<T> {
        Snapshot::capture(self.store.load_full())
    }

    /// Returns the number of elements in the current store.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks whether the current store is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the capacity of the current store.
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Gets a copy of the `index`-th element, or `None` when out of range.
    #[must_use = "Fetched elements must have a purpose!"]
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.lock().get(index).cloned()
    }

    /// Gets a copy of the `index`-th element with bounds checking.
    pub fn at(&self, index: usize) -> anyhow::Result<T>
    where
        T: Clone,
    {
        let snapshot = self.lock();
        Ok(snapshot.at(index)?.clone())
    }

    /// Gets a copy of the first element, or `None` when empty.
    pub fn front(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().front().cloned()
    }

    /// Gets a copy of the last element, or `None` when empty.
    pub fn back(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().back().cloned()
    }

    /// Materializes the current store into an independent `Vec<T>`.
    #[must_use = "Materialized contents must have a purpose!"]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().to_vec()
    }

    /// Returns the store policy this container allocates fresh stores with.
    pub fn policy(&self) -> Arc<dyn StorePolicy> {
        Arc::clone(&self.policy)
    }

    /// Allocates a fresh backing store able to hold `extra` elements beyond
    /// the current contents, sized by the store policy, and pre-filled with a
    /// copy of `current`.
    fn fresh(&self, current: &Vec<T>, extra: usize) -> Vec<T>
    where
        T: Clone,
    {
        let required = current.len() + extra;
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), required));
        next.extend_from_slice(current);
        next
    }

    /// Publishes `next` as the new current store. Caller must hold the
    /// serializer.
    fn publish(&self, next: Vec<T>) {
        self.store.store(Arc::new(next));
    }

    /// Replaces the contents with `count` copies of `value`.
    pub async fn assign(&self, count: usize, value: T)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), count));
        next.resize(count, value);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Replaces the contents with the elements of the iterator.
    pub async fn assign_iter(&self, iter: impl IntoIterator<Item = T>) {
        let items: Vec<T> = iter.into_iter().collect();
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), items.len()));
        next.extend(items);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Republishes the contents in a store with at least `new_cap` capacity.
    pub async fn reserve(&self, new_cap: usize)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = Vec::with_capacity(new_cap.max(current.len()));
        next.extend_from_slice(&current);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Republishes the contents in a store with no excess capacity.
    pub async fn shrink_to_fit(&self)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = Vec::with_capacity(current.len());
        next.extend_from_slice(&current);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Clears the contents. The fresh store keeps the capacity the policy
    /// grants for the displaced one.
    pub async fn clear(&self) {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let next: Vec<T> = Vec::with_capacity(self.policy.capacity(current.capacity(), 0));
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Inserts `value` before the given index. Panics when `index > len`.
    pub async fn insert_at(&self, index: usize, value: T)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 1);
        next.insert(index, value);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Inserts `count` copies of `value` before the given index. Panics when
    /// `index > len`.
    pub async fn insert_many_at(&self, index: usize, count: usize, value: T)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let required = current.len() + count;
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), required));
        next.extend_from_slice(&current[..index]);
        next.extend(std::iter::repeat(value).take(count));
        next.extend_from_slice(&current[index..]);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Inserts the elements of the iterator before the given index. Panics
    /// when `index > len`.
    pub async fn insert_iter_at(&self, index: usize, iter: impl IntoIterator<Item = T>)
    where
        T: Clone,
    {
        let items: Vec<T> = iter.into_iter().collect();
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let required = current.len() + items.len();
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), required));
        next.extend_from_slice(&current[..index]);
        next.extend(items);
        next.extend_from_slice(&current[index..]);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Inserts the element produced by `make` before the given index. The
    /// closure runs inside the critical section, against the fresh store
    /// only. Panics when `index > len`.
    pub async fn insert_at_with(&self, index: usize, make: impl FnOnce() -> T)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 1);
        next.insert(index, make());
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Replaces the first element equal to `old` with `new`.
    ///
    /// Probes the current store first; when no element matches, no copy is
    /// made and no new store is published.
    ///
    /// Returns `true` if an element was replaced.
    pub async fn replace(&self, old: &T, new: T) -> bool
    where
        T: Clone + PartialEq,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let Some(index) = current.iter().position(|element| element == old) else {
            crate::drop!(serializer);
            return false;
        };
        let mut next = self.fresh(&current, 0);
        next[index] = new;
        self.publish(next);
        crate::drop!(serializer);
        true
    }

    /// Replaces every element equal to `old` with a copy of `new`. The copy
    /// is deferred until the first match, so zero matches cost no copy.
    ///
    /// Returns the number of elements replaced.
    pub async fn replace_all(&self, old: &T, new: T) -> usize
    where
        T: Clone + PartialEq,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next: Option<Vec<T>> = None;
        let mut replaced = 0;
        for (index, element) in current.iter().enumerate() {
            if element == old {
                let next = next.get_or_insert_with(|| self.fresh(&current, 0));
                next[index] = new.clone();
                replaced += 1;
            }
        }
        if let Some(next) = next {
            self.publish(next);
        }
        crate::drop!(serializer);
        replaced
    }

    /// Replaces the element at the given index with `value`. Panics when
    /// `index >= len`.
    pub async fn replace_at(&self, index: usize, value: T)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 0);
        next[index] = value;
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Replaces the first element matching the predicate with `value`.
    /// No copy is made when nothing matches.
    ///
    /// Returns `true` if an element was replaced.
    pub async fn replace_if(&self, mut predicate: impl FnMut(&T) -> bool, value: T) -> bool
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let Some(index) = current.iter().position(|element| predicate(element)) else {
            crate::drop!(serializer);
            return false;
        };
        let mut next = self.fresh(&current, 0);
        next[index] = value;
        self.publish(next);
        crate::drop!(serializer);
        true
    }

    /// Replaces every element matching the predicate with a copy of `value`.
    /// The copy is deferred until the first match.
    ///
    /// Returns the number of elements replaced.
    pub async fn replace_all_if(
        &self,
        mut predicate: impl FnMut(&T) -> bool,
        value: T,
    ) -> usize
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next: Option<Vec<T>> = None;
        let mut replaced = 0;
        for (index, element) in current.iter().enumerate() {
            if predicate(element) {
                let next = next.get_or_insert_with(|| self.fresh(&current, 0));
                next[index] = value.clone();
                replaced += 1;
            }
        }
        if let Some(next) = next {
            self.publish(next);
        }
        crate::drop!(serializer);
        replaced
    }

    /// Erases the first element equal to `value`. No copy is made when
    /// nothing matches.
    ///
    /// Returns `true` if an element was erased.
    pub async fn erase(&self, value: &T) -> bool
    where
        T: Clone + PartialEq,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let Some(index) = current.iter().position(|element| element == value) else {
            crate::drop!(serializer);
            return false;
        };
        self.publish(self.copy_without(&current, index));
        crate::drop!(serializer);
        true
    }

    /// ### -> `erase_all`
    ///
    /// Erases every element equal to `value`. The copy is deferred until the
    /// first match, so zero matches cost no copy.
    ///
    /// Returns the number of elements erased.
    ///
    /// ```
    /// use snapvec::vector::prelude::*;
    ///
    /// async fn example() -> anyhow::Result<()> {
    ///     let vector = CowVec::from(vec![5, 1, 5, 2, 5, 3]);
    ///     assert_eq!(vector.erase_all(&5).await, 3);
    ///     assert_eq!(vector.to_vec(), vec![1, 2, 3]);
    ///     Ok(())
    /// }
    ///
    /// snapvec::future!(example());
    /// ```
    pub async fn erase_all(&self, value: &T) -> usize
    where
        T: Clone + PartialEq,
    {
        self.erase_all_if(|element| element == value).await
    }

    /// Erases the element at the given index. Panics when `index >= len`.
    pub async fn erase_at(&self, index: usize)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        self.publish(self.copy_without(&current, index));
        crate::drop!(serializer);
    }

    /// Erases the elements in the index range `[first, last)`. Panics when
    /// the range is out of bounds.
    pub async fn erase_range(&self, first: usize, last: usize)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let required = current.len().saturating_sub(last.saturating_sub(first));
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), required));
        next.extend_from_slice(&current[..first]);
        next.extend_from_slice(&current[last..]);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Erases the first element matching the predicate. No copy is made when
    /// nothing matches.
    ///
    /// Returns `true` if an element was erased.
    pub async fn erase_if(&self, mut predicate: impl FnMut(&T) -> bool) -> bool
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let Some(index) = current.iter().position(|element| predicate(element)) else {
            crate::drop!(serializer);
            return false;
        };
        self.publish(self.copy_without(&current, index));
        crate::drop!(serializer);
        true
    }

    /// Erases every element matching the predicate. The copy is deferred
    /// until the first match.
    ///
    /// Returns the number of elements erased.
    pub async fn erase_all_if(&self, mut predicate: impl FnMut(&T) -> bool) -> usize
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let Some(first) = current.iter().position(|element| predicate(element)) else {
            crate::drop!(serializer);
            return 0;
        };
        let required = current.len() - 1;
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), required));
        next.extend_from_slice(&current[..first]);
        let mut erased = 1;
        for element in &current[first + 1..] {
            if predicate(element) {
                erased += 1;
            } else {
                next.push(element.clone());
            }
        }
        self.publish(next);
        crate::drop!(serializer);
        erased
    }

    /// ### -> `push_back`
    ///
    /// Adds `value` to the end.
    ///
    /// ```
    /// use snapvec::vector::prelude::*;
    ///
    /// async fn example() -> anyhow::Result<()> {
    ///     let vector = CowVec::new();
    ///     vector.push_back(42).await;
    ///     assert_eq!(vector.back(), Some(42));
    ///     Ok(())
    /// }
    ///
    /// snapvec::future!(example());
    /// ```
    pub async fn push_back(&self, value: T)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 1);
        next.push(value);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Adds the elements of the iterator to the end. An empty iterator is a
    /// publish-free no-op.
    pub async fn extend(&self, iter: impl IntoIterator<Item = T>)
    where
        T: Clone,
    {
        let items: Vec<T> = iter.into_iter().collect();
        if items.is_empty() {
            return;
        }
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, items.len());
        next.extend(items);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// ### -> `push_back_if_absent`
    ///
    /// Adds `value` to the end unless an equal element is already present.
    /// No copy is made when the value is present.
    ///
    /// Returns `true` if the element was added.
    ///
    /// ```
    /// use snapvec::vector::prelude::*;
    ///
    /// async fn example() -> anyhow::Result<()> {
    ///     let vector = CowVec::from(vec![1, 2, 3]);
    ///     assert!(vector.push_back_if_absent(4).await);
    ///     assert!(!vector.push_back_if_absent(4).await);
    ///     assert_eq!(vector.to_vec(), vec![1, 2, 3, 4]);
    ///     Ok(())
    /// }
    ///
    /// snapvec::future!(example());
    /// ```
    pub async fn push_back_if_absent(&self, value: T) -> bool
    where
        T: Clone + PartialEq,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        if current.contains(&value) {
            crate::drop!(serializer);
            return false;
        }
        let mut next = self.fresh(&current, 1);
        next.push(value);
        self.publish(next);
        crate::drop!(serializer);
        true
    }

    /// Adds the elements of the iterator that are not already present,
    /// including against elements added earlier in the same call. The copy
    /// is deferred until the first actual addition.
    ///
    /// Returns the number of elements added.
    pub async fn extend_if_absent(&self, iter: impl IntoIterator<Item = T>) -> usize
    where
        T: Clone + PartialEq,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next: Option<Vec<T>> = None;
        let mut added = 0;
        for item in iter {
            let haystack: &[T] = next.as_deref().unwrap_or(&current);
            if !haystack.contains(&item) {
                let next = next.get_or_insert_with(|| self.fresh(&current, 0));
                next.push(item);
                added += 1;
            }
        }
        if let Some(next) = next {
            self.publish(next);
        }
        crate::drop!(serializer);
        added
    }

    /// Adds the element produced by `make` to the end. The closure runs
    /// inside the critical section, against the fresh store only.
    pub async fn push_back_with(&self, make: impl FnOnce() -> T)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 1);
        next.push(make());
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Removes the last element and returns a copy of it, or `None` when
    /// empty (a publish-free no-op).
    pub async fn pop_back(&self) -> Option<T>
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        if current.is_empty() {
            crate::drop!(serializer);
            return None;
        }
        let popped = current[current.len() - 1].clone();
        self.publish(self.copy_without(&current, current.len() - 1));
        crate::drop!(serializer);
        Some(popped)
    }

    /// Resizes the container to `count` elements, appending copies of
    /// `value` when growing.
    pub async fn resize(&self, count: usize, value: T)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), count));
        let retained = count.min(current.len());
        next.extend_from_slice(&current[..retained]);
        next.resize(count, value);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Resizes the container to `count` elements, appending default values
    /// when growing.
    pub async fn resize_default(&self, count: usize)
    where
        T: Clone + Default,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), count));
        let retained = count.min(current.len());
        next.extend_from_slice(&current[..retained]);
        next.resize_with(count, T::default);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// ### -> `swap`
    ///
    /// Exchanges the contents of two containers, each side receiving a fresh
    /// copy of the other's current store.
    ///
    /// Both serializers are acquired in a fixed total order (by container
    /// address, lower address first), so concurrent cross-swaps of the same
    /// pair cannot deadlock. Swapping a container with itself is a no-op.
    pub async fn swap(&self, other: &Self)
    where
        T: Clone,
    {
        if std::ptr::eq(self, other) {
            return;
        }
        let (first, second) = if (self as *const Self) < (other as *const Self) {
            (self, other)
        } else {
            (other, self)
        };
        let first_guard = first.serializer.lock().await;
        let second_guard = second.serializer.lock().await;

        let ours = self.store.load_full();
        let theirs = other.store.load_full();
        self.publish(self.fresh(&theirs, 0));
        other.publish(other.fresh(&ours, 0));

        crate::drop!(second_guard, first_guard);
    }

    /// Sorts the elements into ascending order. The sort is stable.
    pub async fn sort(&self)
    where
        T: Clone + Ord,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 0);
        next.sort();
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Sorts the elements with the given comparator. The sort is stable.
    pub async fn sort_by(&self, compare: impl FnMut(&T, &T) -> std::cmp::Ordering)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 0);
        next.sort_by(compare);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Sorts the elements into ascending order without preserving the order
    /// of equal elements.
    pub async fn sort_unstable(&self)
    where
        T: Clone + Ord,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 0);
        next.sort_unstable();
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Sorts the elements with the given comparator without preserving the
    /// order of equal elements.
    pub async fn sort_unstable_by(&self, compare: impl FnMut(&T, &T) -> std::cmp::Ordering)
    where
        T: Clone,
    {
        let serializer = self.serializer.lock().await;
        let current = self.store.load_full();
        let mut next = self.fresh(&current, 0);
        next.sort_unstable_by(compare);
        self.publish(next);
        crate::drop!(serializer);
    }

    /// Copy of `current` with the element at `index` left out, policy-sized.
    /// Panics when `index >= len`.
    fn copy_without(&self, current: &Vec<T>, index: usize) -> Vec<T>
    where
        T: Clone,
    {
        let required = current.len() - 1;
        let mut next = Vec::with_capacity(self.policy.capacity(current.capacity(), required));
        next.extend_from_slice(&current[..index]);
        next.extend_from_slice(&current[index + 1..]);
        next
    }
}

impl<T> Default for CowVec<T>
where
    T: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for CowVec<T>
where
    T: Send + Sync + 'static,
{
    fn from(store: Vec<T>) -> Self {
        Self {
            store: ArcSwap::from_pointee(store),
            serializer: Mutex::new(()),
            policy: Arc::new(Amortized),
        }
    }
}

impl<T> From<&[T]> for CowVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(slice: &[T]) -> Self {
        Self::from(slice.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for CowVec<T>
where
    T: Send + Sync + 'static,
{
    fn from(array: [T; N]) -> Self {
        Self::from(Vec::from(array))
    }
}

impl<T> FromIterator<T> for CowVec<T>
where
    T: Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

/// Deep copy: the clone gets a fresh copy of the current store, its own
/// serializer, and the same store policy.
impl<T> Clone for CowVec<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        let current = self.store.load_full();
        Self {
            store: ArcSwap::from_pointee(current.as_ref().clone()),
            serializer: Mutex::new(()),
            policy: Arc::clone(&self.policy),
        }
    }
}

impl<T> std::fmt::Debug for CowVec<T>
where
    T: std::fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.lock().as_slice()).finish()
    }
}

/// Comparisons read the stores currently published on each side; a mutation
/// concurrently in flight may land on either side of the comparison, which is
/// consistent with the lock-free read semantics.
impl<T> PartialEq for CowVec<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        self.lock().as_slice() == other.lock().as_slice()
    }
}

impl<T> Eq for CowVec<T> where T: Eq + Send + Sync + 'static {}

impl<T> PartialOrd for CowVec<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.lock().as_slice().partial_cmp(other.lock().as_slice())
    }
}

impl<T> Ord for CowVec<T>
where
    T: Ord + Send + Sync + 'static,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.lock().as_slice().cmp(other.lock().as_slice())
    }
}

pub mod prelude;

#[cfg(test)]
mod tests;
