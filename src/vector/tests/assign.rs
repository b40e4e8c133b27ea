use std::sync::Arc;

use crate::vector::prelude::*;

#[tokio::test]
async fn assign_replaces_contents() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![1, 2, 3]);

    vector.assign(4, 7).await;
    assert_eq!(vector.to_vec(), vec![7, 7, 7, 7]);

    vector.assign_iter(10..13).await;
    assert_eq!(vector.to_vec(), vec![10, 11, 12]);
    Ok(())
}

#[tokio::test]
async fn clear_preserves_capacity() -> anyhow::Result<()> {
    let vector = CowVec::<i32>::new();
    vector.extend(0..50).await;
    let capacity = vector.capacity();
    assert!(capacity >= 50);

    vector.clear().await;
    assert!(vector.is_empty());
    assert!(vector.capacity() >= capacity);
    Ok(())
}

#[tokio::test]
async fn reserve_and_shrink() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![1, 2, 3]);

    vector.reserve(100).await;
    assert!(vector.capacity() >= 100);
    assert_eq!(vector.to_vec(), vec![1, 2, 3]);

    vector.shrink_to_fit().await;
    assert_eq!(vector.capacity(), 3);
    assert_eq!(vector.to_vec(), vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn resize_grows_and_truncates() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![1, 2]);

    vector.resize(4, 9).await;
    assert_eq!(vector.to_vec(), vec![1, 2, 9, 9]);

    vector.resize(1, 0).await;
    assert_eq!(vector.to_vec(), vec![1]);

    vector.resize_default(3).await;
    assert_eq!(vector.to_vec(), vec![1, 0, 0]);
    Ok(())
}

#[tokio::test]
async fn exact_policy_allocates_tight_stores() -> anyhow::Result<()> {
    let vector = CowVec::with_policy(Arc::new(Exact));
    vector.push_back(1).await;
    vector.push_back(2).await;
    vector.push_back(3).await;

    assert_eq!(vector.capacity(), 3);
    assert_eq!(vector.to_vec(), vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn amortized_policy_follows_growth_curve() -> anyhow::Result<()> {
    assert_eq!(Amortized.capacity(0, 1), 8);
    assert_eq!(Amortized.capacity(8, 9), 12);
    assert_eq!(Amortized.capacity(4096, 4097), 4096 + 1024);
    // a sufficient store is kept as-is
    assert_eq!(Amortized.capacity(16, 10), 16);
    // required always wins
    assert_eq!(Amortized.capacity(8, 1000), 1000);
    Ok(())
}

#[tokio::test]
async fn policy_is_propagated() -> anyhow::Result<()> {
    let policy: Arc<dyn StorePolicy> = Arc::new(Exact);
    let vector = CowVec::<i32>::with_policy(Arc::clone(&policy));
    assert!(Arc::ptr_eq(&vector.policy(), &policy));

    // the deep clone carries the same policy
    let cloned = vector.clone();
    assert!(Arc::ptr_eq(&cloned.policy(), &policy));
    Ok(())
}
