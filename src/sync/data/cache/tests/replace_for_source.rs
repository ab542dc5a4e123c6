//! Tests for CacheRepository::replace_for_source and its building blocks.

use super::*;

/// Tests that replacing one source leaves the other sources untouched.
///
/// Expected: north holds exactly the new row, south keeps its original row
#[tokio::test]
async fn replaces_only_rows_of_given_source() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_cache_tables()
        .with_cached_visp("north", 1, "North A")
        .with_cached_visp("north", 2, "North B")
        .with_cached_visp("south", 1, "South A")
        .build()
        .await?;

    let repo = CacheRepository::new(&test.db, 1000);
    let written = repo
        .replace_for_source("north", vec![visp_model("north", 3)])
        .await?;

    assert_eq!(written, 1);

    let north = repo.find_by_source::<entity::prelude::CacheVisp>("north").await?;
    assert_eq!(north.len(), 1);
    assert_eq!(north[0].source_id, 3);

    let south = repo.find_by_source::<entity::prelude::CacheVisp>("south").await?;
    assert_eq!(south.len(), 1);
    assert_eq!(south[0].name, "South A");

    Ok(())
}

/// Tests that an empty replacement clears the source.
///
/// Expected: no rows left for the source
#[tokio::test]
async fn empty_replacement_clears_source() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_cache_tables()
        .with_cached_visp("north", 1, "North A")
        .build()
        .await?;

    let repo = CacheRepository::new(&test.db, 1000);
    let written = repo
        .replace_for_source::<entity::cache_visp::ActiveModel>("north", Vec::new())
        .await?;

    assert_eq!(written, 0);
    assert!(repo
        .find_by_source::<entity::prelude::CacheVisp>("north")
        .await?
        .is_empty());

    Ok(())
}

/// Tests that inserts are split into chunks of the configured batch size.
///
/// Expected: all five rows stored with a batch size of two
#[tokio::test]
async fn inserts_in_chunks() -> Result<(), TestError> {
    let test = TestBuilder::new().with_cache_tables().build().await?;

    let repo = CacheRepository::new(&test.db, 2);
    let models = (1..=5).map(|id| visp_model("north", id)).collect();
    let written = repo.insert_chunked(models).await?;

    assert_eq!(written, 5);
    assert_eq!(
        entity::prelude::CacheVisp::find().all(&test.db).await?.len(),
        5
    );

    Ok(())
}

/// Tests that a replacement inside a rolled back transaction leaves the prior state.
///
/// Expected: the original row is still present after rollback
#[tokio::test]
async fn rollback_restores_prior_rows() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_cache_tables()
        .with_cached_visp("north", 1, "North A")
        .build()
        .await?;

    let txn = test.db.begin().await?;
    let repo = CacheRepository::new(&txn, 1000);
    repo.replace_for_source("north", vec![visp_model("north", 9)])
        .await?;
    txn.rollback().await?;

    let repo = CacheRepository::new(&test.db, 1000);
    let north = repo.find_by_source::<entity::prelude::CacheVisp>("north").await?;
    assert_eq!(north.len(), 1);
    assert_eq!(north[0].source_id, 1);

    Ok(())
}
