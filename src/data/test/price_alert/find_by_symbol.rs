use super::*;

/// Tests that alerts are filtered by symbol and decoded.
///
/// Expected: Ok with the two PEPE alerts in creation order
#[tokio::test]
async fn returns_alerts_for_symbol() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = PriceAlertFactory::new(db, "PEPE")
        .owner_id("111")
        .target_price("10")
        .direction("above")
        .build()
        .await?;
    let second = factory::create_alert(db, "PEPE", "0.5", "under").await?;
    factory::create_alert(db, "DOGE", "1", "above").await?;

    let repo = PriceAlertRepository::new(db.clone());
    let alerts = repo.find_by_symbol("PEPE").await.unwrap();

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].id, first.id);
    assert_eq!(alerts[0].owner_id, "111");
    assert_eq!(alerts[0].target_price, dec!(10));
    assert_eq!(alerts[0].direction, AlertDirection::Above);
    assert_eq!(alerts[1].id, second.id);
    assert_eq!(alerts[1].direction, AlertDirection::Under);

    Ok(())
}

/// Tests a symbol with no alerts.
///
/// Expected: Ok with empty Vec
#[tokio::test]
async fn returns_empty_for_unknown_symbol() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PriceAlertRepository::new(db.clone());
    let alerts = repo.find_by_symbol("NOPE").await.unwrap();

    assert!(alerts.is_empty());

    Ok(())
}

/// Tests that an alert row with an unknown direction is skipped while the
/// other alerts on the symbol are still returned.
///
/// Expected: Ok with the two decodable alerts only
#[tokio::test]
async fn skips_undecodable_alert() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_alert(db, "PEPE", "0.01", "above").await?;
    factory::create_alert(db, "PEPE", "0.02", "sideways").await?;
    PriceAlertFactory::new(db, "PEPE")
        .target_price("lots")
        .build()
        .await?;
    let last = factory::create_alert(db, "PEPE", "0.5", "under").await?;

    let repo = PriceAlertRepository::new(db.clone());
    let alerts = repo.find_by_symbol("PEPE").await.unwrap();

    let ids: Vec<i32> = alerts.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![first.id, last.id]);

    Ok(())
}
