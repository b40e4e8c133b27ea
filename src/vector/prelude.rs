pub use {
    crate::vector::CowVec,
    crate::vector::policy::{Amortized, Exact, StorePolicy},
    crate::vector::snapshot::{IntoIter, Snapshot},
};
