use super::*;

/// Tests that only tokens crashed strictly before the cutoff are returned.
///
/// Expected: Ok with the old crashed token only
#[tokio::test]
async fn returns_tokens_crashed_before_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let old = TokenFactory::new(db)
        .crashed_at(now - Duration::hours(30))
        .build()
        .await?;
    TokenFactory::new(db)
        .crashed_at(now - Duration::hours(2))
        .build()
        .await?;
    factory::create_token(db).await?;

    let repo = SimulatedTokenRepository::new(db.clone());
    let tokens = repo
        .list_crashed_before(now - Duration::hours(24))
        .await
        .unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].id, old.id);

    Ok(())
}

/// Tests that an undecodable crashed row does not hide the purgeable ones.
///
/// Expected: Ok with only the decodable crashed token
#[tokio::test]
async fn skips_undecodable_crashed_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    TokenFactory::new(db)
        .symbol("BAD")
        .price("n/a")
        .crashed_at(now - Duration::hours(48))
        .build()
        .await?;
    let old = TokenFactory::new(db)
        .symbol("RUG")
        .crashed_at(now - Duration::hours(30))
        .build()
        .await?;

    let repo = SimulatedTokenRepository::new(db.clone());
    let tokens = repo
        .list_crashed_before(now - Duration::hours(24))
        .await
        .unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].id, old.id);

    Ok(())
}

/// Tests that deleting a purged token removes the row.
///
/// Expected: Ok with the token gone
#[tokio::test]
async fn delete_removes_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;

    let repo = SimulatedTokenRepository::new(db.clone());
    repo.delete(token.id).await.unwrap();

    assert!(repo.get(token.id).await.unwrap().is_none());

    Ok(())
}
