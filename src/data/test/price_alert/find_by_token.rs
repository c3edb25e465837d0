use super::*;

/// Tests that alerts are resolved through the token's symbol.
///
/// Expected: Ok with the token's alerts
#[tokio::test]
async fn resolves_alerts_through_symbol() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::token::create_token_with_price(db, "PEPE", "1").await?;
    let alert = factory::create_alert(db, "PEPE", "2", "above").await?;
    factory::create_alert(db, "DOGE", "2", "above").await?;

    let repo = PriceAlertRepository::new(db.clone());
    let alerts = repo.find_by_token(token.id).await.unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, alert.id);

    Ok(())
}

/// Tests looking up alerts for a token that does not exist.
///
/// Expected: Ok with empty Vec
#[tokio::test]
async fn returns_empty_for_missing_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PriceAlertRepository::new(db.clone());
    let alerts = repo.find_by_token(42).await.unwrap();

    assert!(alerts.is_empty());

    Ok(())
}
