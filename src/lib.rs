//! # snapvec
//!
//! A snapshot-isolated, copy-on-write concurrent vector.
//!
//! [`CowVec<T>`](vector::prelude::CowVec) never mutates a published backing
//! store in place: every mutating operation copies the current store, mutates
//! the copy, and atomically publishes it. Readers take cheap reference-counted
//! [snapshots](vector::prelude::Snapshot) that stay valid and unchanged for
//! their entire lifetime, no matter how many mutations race past them.
//!
//! ```
//! use snapvec::vector::prelude::*;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let vector = CowVec::from(vec![2, 3, 5, 7, 11, 13]);
//!
//!     // A frozen, read-only view. No lock is taken.
//!     let snapshot = vector.lock();
//!
//!     // Mutations are welcome while the snapshot is being scanned.
//!     vector.push_back(999).await;
//!
//!     assert_eq!(snapshot.len(), 6);
//!     assert_eq!(vector.len(), 7);
//!     assert_eq!(vector.back(), Some(999));
//!
//!     Ok(())
//! }
//!
//! snapvec::future!(example());
//! ```

#[macro_export]
macro_rules! future {
    ($coroutine: expr) => {
        futures::executor::block_on($coroutine)
    };
}

#[macro_export]
macro_rules! drop {
    ($($x:expr),* $(,)?) => {
        $( std::mem::drop($x); )*
    };
}

pub mod vector;
