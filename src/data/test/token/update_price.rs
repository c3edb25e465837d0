use super::*;

/// Tests that the new price is stored exactly.
///
/// Expected: Ok with the stored string normalized
#[tokio::test]
async fn stores_exact_price() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::token::create_token_with_price(db, "PEPE", "0.002").await?;

    let repo = SimulatedTokenRepository::new(db.clone());
    repo.update_price(token.id, dec!(0.0021534000)).await.unwrap();

    let stored = entity::prelude::Token::find_by_id(token.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.price_per_unit, "0.0021534");

    let reloaded = repo.get(token.id).await.unwrap().unwrap();
    assert_eq!(reloaded.price_per_unit, dec!(0.0021534));

    Ok(())
}

/// Tests updating a token that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn fails_for_missing_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SimulatedTokenRepository::new(db.clone());
    let result = repo.update_price(999, dec!(1)).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
