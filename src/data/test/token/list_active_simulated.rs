use super::*;

/// Tests that only simulated, non-crashed tokens are returned.
///
/// Expected: Ok with the single active simulated token
#[tokio::test]
async fn returns_only_active_simulated_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let active = factory::token::create_token_with_price(db, "PEPE", "0.002").await?;
    TokenFactory::new(db).symbol("REAL").simulated(false).build().await?;
    TokenFactory::new(db)
        .symbol("RUG")
        .crashed_at(Utc::now())
        .build()
        .await?;

    let repo = SimulatedTokenRepository::new(db.clone());
    let tokens = repo.list_active_simulated().await.unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].id, active.id);
    assert_eq!(tokens[0].symbol, "PEPE");
    assert_eq!(tokens[0].price_per_unit, dec!(0.002));
    assert!(!tokens[0].is_crashed());

    Ok(())
}

/// Tests that tokens come back in id order.
///
/// Expected: Ok with ids ascending
#[tokio::test]
async fn orders_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_token(db).await?;
    let second = factory::create_token(db).await?;
    let third = factory::create_token(db).await?;

    let repo = SimulatedTokenRepository::new(db.clone());
    let ids: Vec<i32> = repo
        .list_active_simulated()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(ids, vec![first.id, second.id, third.id]);

    Ok(())
}

/// Tests that a token with an undecodable stored price is skipped.
///
/// Expected: Ok with only the decodable tokens, in id order
#[tokio::test]
async fn skips_token_with_undecodable_price() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let fine = factory::token::create_token_with_price(db, "FINE", "0.5").await?;
    factory::token::create_token_with_price(db, "BAD", "not-a-price").await?;
    let other = factory::token::create_token_with_price(db, "OTHER", "0.002").await?;

    let repo = SimulatedTokenRepository::new(db.clone());
    let tokens = repo.list_active_simulated().await.unwrap();

    let ids: Vec<i32> = tokens.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![fine.id, other.id]);

    Ok(())
}
