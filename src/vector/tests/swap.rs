use std::sync::Arc;

use crate::vector::prelude::*;

#[tokio::test]
async fn swap_exchanges_contents() -> anyhow::Result<()> {
    let left = CowVec::from(vec![1, 2, 3]);
    let right = CowVec::from(vec![9]);

    left.swap(&right).await;

    assert_eq!(left.to_vec(), vec![9]);
    assert_eq!(right.to_vec(), vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn swap_with_self_is_a_no_op() -> anyhow::Result<()> {
    let vector = Arc::new(CowVec::from(vec![1, 2]));
    vector.swap(&vector).await;
    assert_eq!(vector.to_vec(), vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn swap_does_not_disturb_snapshots() -> anyhow::Result<()> {
    let left = CowVec::from(vec![1]);
    let right = CowVec::from(vec![2]);

    let left_view = left.lock();
    let right_view = right.lock();
    left.swap(&right).await;

    assert_eq!(left_view.to_vec(), vec![1]);
    assert_eq!(right_view.to_vec(), vec![2]);
    Ok(())
}

/// Two tasks swapping the same pair in opposite argument orders must not
/// deadlock; the fixed lock order by container address guarantees it.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_cross_swaps_terminate() -> anyhow::Result<()> {
    let left = Arc::new(CowVec::from(vec![1; 64]));
    let right = Arc::new(CowVec::from(vec![2; 64]));

    let forward = {
        let left = Arc::clone(&left);
        let right = Arc::clone(&right);
        tokio::spawn(async move {
            for _ in 0..100 {
                left.swap(&right).await;
            }
        })
    };
    let backward = {
        let left = Arc::clone(&left);
        let right = Arc::clone(&right);
        tokio::spawn(async move {
            for _ in 0..100 {
                right.swap(&left).await;
            }
        })
    };

    forward.await?;
    backward.await?;

    // 200 swaps total: each side holds one of the two original stores.
    let mut contents = [left.to_vec(), right.to_vec()];
    contents.sort();
    assert_eq!(contents, [vec![1; 64], vec![2; 64]]);
    Ok(())
}
