use crate::vector::prelude::*;

#[tokio::test]
async fn insert_at_positions() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![1, 3]);

    vector.insert_at(1, 2).await;
    assert_eq!(vector.to_vec(), vec![1, 2, 3]);

    vector.insert_at(0, 0).await;
    assert_eq!(vector.to_vec(), vec![0, 1, 2, 3]);

    // index == len appends
    vector.insert_at(4, 4).await;
    assert_eq!(vector.to_vec(), vec![0, 1, 2, 3, 4]);
    Ok(())
}

#[tokio::test]
async fn insert_at_out_of_range_panics() -> anyhow::Result<()> {
    let vector = std::sync::Arc::new(CowVec::from(vec![1]));
    let task = {
        let vector = std::sync::Arc::clone(&vector);
        tokio::spawn(async move { vector.insert_at(5, 0).await })
    };
    assert!(task.await.is_err());
    assert_eq!(vector.to_vec(), vec![1]);
    Ok(())
}

#[tokio::test]
async fn insert_many_at() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![1, 4]);
    vector.insert_many_at(1, 2, 7).await;
    assert_eq!(vector.to_vec(), vec![1, 7, 7, 4]);
    Ok(())
}

#[tokio::test]
async fn insert_iter_at() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![0, 5]);
    vector.insert_iter_at(1, 1..5).await;
    assert_eq!(vector.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    Ok(())
}

#[tokio::test]
async fn insert_at_with_builds_in_place() -> anyhow::Result<()> {
    let vector = CowVec::from(vec!["a".to_string(), "c".to_string()]);
    vector.insert_at_with(1, || "b".to_string()).await;
    assert_eq!(
        vector.to_vec(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
    Ok(())
}
