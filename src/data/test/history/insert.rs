use super::*;

/// Tests that each granularity writes to its own table.
///
/// Expected: Ok with one row per table
#[tokio::test]
async fn writes_to_granularity_table() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;
    let now = Utc::now();

    let repo = TokenHistoryRepository::new(db.clone());
    repo.insert(Granularity::Minute, token.id, dec!(0.0020), now)
        .await
        .unwrap();
    repo.insert(Granularity::Hour, token.id, dec!(0.0021), now)
        .await
        .unwrap();

    assert_eq!(repo.count(Granularity::Minute, token.id).await.unwrap(), 1);
    assert_eq!(repo.count(Granularity::Hour, token.id).await.unwrap(), 1);
    assert_eq!(repo.count(Granularity::Day, token.id).await.unwrap(), 0);

    let minute = repo
        .get_by_token(Granularity::Minute, token.id)
        .await
        .unwrap();
    assert_eq!(minute[0].price, dec!(0.002));

    Ok(())
}

/// Tests that history is removed from every table for one token only.
///
/// Expected: Ok(3) with the other token's history untouched
#[tokio::test]
async fn delete_for_token_clears_all_tables() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;
    let other = factory::create_token(db).await?;
    let now = Utc::now();

    let repo = TokenHistoryRepository::new(db.clone());
    for granularity in [Granularity::Minute, Granularity::Day, Granularity::Week] {
        repo.insert(granularity, token.id, dec!(1), now).await.unwrap();
    }
    repo.insert(Granularity::Minute, other.id, dec!(1), now)
        .await
        .unwrap();

    let deleted = repo.delete_for_token(token.id).await.unwrap();

    assert_eq!(deleted, 3);
    for granularity in Granularity::ALL {
        assert_eq!(repo.count(granularity, token.id).await.unwrap(), 0);
    }
    assert_eq!(repo.count(Granularity::Minute, other.id).await.unwrap(), 1);

    Ok(())
}
