use super::*;

/// Tests that crashing zeroes the price and stamps the crash time.
///
/// Expected: Ok(true) and the token leaves the active list
#[tokio::test]
async fn zeroes_price_and_sets_crashed_at() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::token::create_token_with_price(db, "PEPE", "0.0003").await?;
    let now = Utc::now();

    let repo = SimulatedTokenRepository::new(db.clone());
    let crashed = repo.crash(token.id, now).await.unwrap();

    assert!(crashed);
    let reloaded = repo.get(token.id).await.unwrap().unwrap();
    assert_eq!(reloaded.price_per_unit, dec!(0));
    assert_eq!(
        reloaded.crashed_at.map(|t| t.timestamp()),
        Some(now.timestamp())
    );
    assert!(repo.list_active_simulated().await.unwrap().is_empty());

    Ok(())
}

/// Tests that crashing twice keeps the first crash time.
///
/// Expected: Ok(false) on the second call with `crashed_at` unchanged
#[tokio::test]
async fn second_crash_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;
    let first = Utc::now() - Duration::minutes(5);

    let repo = SimulatedTokenRepository::new(db.clone());
    assert!(repo.crash(token.id, first).await.unwrap());
    assert!(!repo.crash(token.id, Utc::now()).await.unwrap());

    let reloaded = repo.get(token.id).await.unwrap().unwrap();
    assert_eq!(
        reloaded.crashed_at.map(|t| t.timestamp()),
        Some(first.timestamp())
    );

    Ok(())
}
