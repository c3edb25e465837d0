use super::*;

/// Tests that exactly the oldest rows are removed.
///
/// Expected: Ok(21) with the newest 100 rows remaining
#[tokio::test]
async fn deletes_oldest_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;
    let rows =
        factory::token_history::create_minute_series(db, token.id, 121, Utc::now()).await?;

    let repo = TokenHistoryRepository::new(db.clone());
    let deleted = repo
        .delete_oldest(Granularity::Minute, token.id, 21)
        .await
        .unwrap();

    assert_eq!(deleted, 21);
    let remaining = repo
        .get_by_token(Granularity::Minute, token.id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 100);
    assert_eq!(remaining[0].id, rows[21].id);
    assert_eq!(remaining[99].id, rows[120].id);

    Ok(())
}

/// Tests deleting more rows than exist.
///
/// Expected: Ok with every row of the token removed
#[tokio::test]
async fn caps_at_available_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;
    factory::token_history::create_minute_series(db, token.id, 3, Utc::now()).await?;

    let repo = TokenHistoryRepository::new(db.clone());
    let deleted = repo
        .delete_oldest(Granularity::Minute, token.id, 10)
        .await
        .unwrap();

    assert_eq!(deleted, 3);
    assert_eq!(repo.count(Granularity::Minute, token.id).await.unwrap(), 0);

    Ok(())
}
