use super::*;

/// Tests an hourly entry written ten minutes ago.
///
/// Expected: Ok(true) inside a one hour window
#[tokio::test]
async fn finds_entry_inside_window() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;
    let now = Utc::now();
    factory::token_history::create_hourly_entry(db, token.id, "1", now - Duration::minutes(10))
        .await?;

    let repo = TokenHistoryRepository::new(db.clone());
    let recent = repo
        .has_recent_entry(Granularity::Hour, token.id, Duration::hours(1), now)
        .await
        .unwrap();

    assert!(recent);

    Ok(())
}

/// Tests an hourly entry written sixty one minutes ago.
///
/// Expected: Ok(false) outside a one hour window
#[tokio::test]
async fn ignores_entry_outside_window() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;
    let now = Utc::now();
    factory::token_history::create_hourly_entry(db, token.id, "1", now - Duration::minutes(61))
        .await?;

    let repo = TokenHistoryRepository::new(db.clone());
    let recent = repo
        .has_recent_entry(Granularity::Hour, token.id, Duration::hours(1), now)
        .await
        .unwrap();

    assert!(!recent);

    Ok(())
}

/// Tests that another token's entry does not count.
///
/// Expected: Ok(false)
#[tokio::test]
async fn scoped_to_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_memecoin_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let token = factory::create_token(db).await?;
    let other = factory::create_token(db).await?;
    let now = Utc::now();
    factory::token_history::create_hourly_entry(db, other.id, "1", now).await?;

    let repo = TokenHistoryRepository::new(db.clone());
    let recent = repo
        .has_recent_entry(Granularity::Hour, token.id, Duration::hours(1), now)
        .await
        .unwrap();

    assert!(!recent);

    Ok(())
}
