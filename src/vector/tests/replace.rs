use crate::vector::prelude::*;

#[tokio::test]
async fn replace_first_match() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![1, 2, 1]);
    assert!(vector.replace(&1, 9).await);
    assert_eq!(vector.to_vec(), vec![9, 2, 1]);

    let before = vector.lock();
    assert!(!vector.replace(&77, 0).await);
    assert!(before.ptr_eq(&vector.lock()));
    Ok(())
}

#[tokio::test]
async fn replace_all_counts_matches() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![1, 2, 1, 3, 1]);
    assert_eq!(vector.replace_all(&1, 0).await, 3);
    assert_eq!(vector.to_vec(), vec![0, 2, 0, 3, 0]);

    let before = vector.lock();
    assert_eq!(vector.replace_all(&1, 0).await, 0);
    assert!(before.ptr_eq(&vector.lock()));
    Ok(())
}

#[tokio::test]
async fn replace_at_index() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![10, 20, 30]);
    vector.replace_at(1, 99).await;
    assert_eq!(vector.to_vec(), vec![10, 99, 30]);
    Ok(())
}

#[tokio::test]
async fn replace_at_out_of_range_panics() -> anyhow::Result<()> {
    let vector = std::sync::Arc::new(CowVec::from(vec![1]));
    let task = {
        let vector = std::sync::Arc::clone(&vector);
        tokio::spawn(async move { vector.replace_at(3, 0).await })
    };
    assert!(task.await.is_err());
    assert_eq!(vector.to_vec(), vec![1]);
    Ok(())
}

#[tokio::test]
async fn replace_if_and_replace_all_if() -> anyhow::Result<()> {
    let vector = CowVec::from(vec![1, 2, 3, 4]);

    assert!(vector.replace_if(|element| element % 2 == 0, 0).await);
    assert_eq!(vector.to_vec(), vec![1, 0, 3, 4]);

    assert_eq!(vector.replace_all_if(|element| *element > 2, 9).await, 2);
    assert_eq!(vector.to_vec(), vec![1, 0, 9, 9]);

    let before = vector.lock();
    assert!(!vector.replace_if(|element| *element < 0, 5).await);
    assert_eq!(vector.replace_all_if(|element| *element < 0, 5).await, 0);
    assert!(before.ptr_eq(&vector.lock()));
    Ok(())
}
