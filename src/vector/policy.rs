/// ### -> `StorePolicy Trait`.
///
/// The injectable allocation strategy of a [`CowVec`](super::CowVec): every
/// mutation allocates a fresh backing store, and the policy decides how much
/// capacity that store carries. Supplied at construction and propagated to
/// every store the container ever allocates.
pub trait StorePolicy: Send + Sync + 'static {
    /// Chooses the capacity of a fresh backing store.
    ///
    /// `current` is the capacity of the store being replaced and `required`
    /// the number of elements the fresh store must hold. The returned
    /// capacity must be at least `required`.
    fn capacity(&self, current: usize, required: usize) -> usize;
}

/// The default policy: keeps the displaced store's capacity while it
/// suffices, and grows along an amortizing curve when it does not: doubling
/// below 8 slots, 1.5x below 4096, and +1024 beyond that.
#[derive(Clone, Copy, Debug, Default)]
pub struct Amortized;

impl StorePolicy for Amortized {
    fn capacity(&self, current: usize, required: usize) -> usize {
        if required <= current {
            return current;
        }
        let grown = if current < 8 {
            (current * 2).max(8)
        } else if current < 4096 {
            current + (current / 2)
        } else {
            current + 1024
        };
        grown.max(required)
    }
}

/// Allocates exactly the required length, trading reallocation churn for
/// minimal footprint.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exact;

impl StorePolicy for Exact {
    fn capacity(&self, _current: usize, required: usize) -> usize {
        required
    }
}
