//! Tests for CacheRepository::replace_snapshot.

use super::*;

fn snapshot() -> ReferenceSnapshot {
    ReferenceSnapshot {
        resellers: vec![
            named(1, " ACME Corp ", "Yes"),
            named(2, "Beta", "no"),
            named(1, "Duplicate of 1", "Yes"),
        ],
        visps: vec![named(10, "Main", "YES")],
        services: vec![ServiceRow {
            source_id: 100,
            name: Some("Fiber 100".to_string()),
            is_enable: Some("Yes".to_string()),
            is_del: Some("Yes".to_string()),
            reseller_access: None,
            visp_access: Some("Selected".to_string()),
        }],
        reseller_permits: vec![
            ResellerPermitRow {
                source_id: 1,
                reseller_id: Some(1),
                visp_id: Some(10),
                permit_item_id: None,
                is_permit: Some("Yes".to_string()),
            },
            ResellerPermitRow {
                source_id: 2,
                reseller_id: Some(1),
                visp_id: Some(10),
                permit_item_id: None,
                is_permit: Some("No".to_string()),
            },
        ],
        service_reseller: vec![
            access(1, 100, 1, "Yes"),
            access(2, 100, 2, "No"),
            access(3, 100, 1, "No"),
        ],
        ..Default::default()
    }
}

/// Tests writing a full snapshot for one source.
///
/// Verifies flag parsing, access defaults, name normalization and dropping of duplicate
/// natural keys (first occurrence wins).
///
/// Expected: written counts exclude duplicates and rows carry the source name
#[tokio::test]
async fn writes_snapshot_tagged_with_source() -> Result<(), TestError> {
    let test = TestBuilder::new().with_cache_tables().build().await?;

    let repo = CacheRepository::new(&test.db, 1000);
    let written = repo.replace_snapshot("north", &snapshot()).await?;

    assert_eq!(written.resellers, 2);
    assert_eq!(written.visps, 1);
    assert_eq!(written.services, 1);
    assert_eq!(written.reseller_permits, 1);
    assert_eq!(written.service_reseller, 2);
    assert_eq!(written.centers, 0);

    let mut resellers = repo
        .find_by_source::<entity::prelude::CacheReseller>("north")
        .await?;
    resellers.sort_by_key(|r| r.source_id);
    assert_eq!(resellers[0].name, " ACME Corp ");
    assert_eq!(resellers[0].name_norm, "acme corp");
    assert!(resellers[0].is_enabled);
    assert!(!resellers[1].is_enabled);

    let services = repo
        .find_by_source::<entity::prelude::CacheService>("north")
        .await?;
    assert!(services[0].is_deleted);
    assert_eq!(services[0].reseller_access, "All");
    assert_eq!(services[0].visp_access, "Selected");

    let permits = repo
        .find_by_source::<entity::prelude::CacheResellerPermit>("north")
        .await?;
    assert_eq!(permits.len(), 1);
    assert!(permits[0].is_permit);
    assert_eq!(permits[0].permit_item_id, None);

    let access = repo
        .find_by_source::<entity::prelude::CacheServiceResellerAccess>("north")
        .await?;
    let checked: Vec<_> = access.iter().map(|a| (a.reseller_id, a.checked)).collect();
    assert!(checked.contains(&(1, true)));
    assert!(checked.contains(&(2, false)));

    Ok(())
}

/// Tests that repeating a sync with unchanged data yields the same stored rows.
///
/// Expected: identical row content (ignoring surrogate ids) after the second run
#[tokio::test]
async fn repeated_sync_is_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new().with_cache_tables().build().await?;
    let repo = CacheRepository::new(&test.db, 1000);

    repo.replace_snapshot("north", &snapshot()).await?;
    let first: Vec<_> = repo
        .find_by_source::<entity::prelude::CacheReseller>("north")
        .await?
        .into_iter()
        .map(|r| (r.source_id, r.name, r.is_enabled))
        .collect();

    repo.replace_snapshot("north", &snapshot()).await?;
    let second: Vec<_> = repo
        .find_by_source::<entity::prelude::CacheReseller>("north")
        .await?
        .into_iter()
        .map(|r| (r.source_id, r.name, r.is_enabled))
        .collect();

    assert_eq!(first, second);
    assert_eq!(
        entity::prelude::CacheServiceResellerAccess::find()
            .all(&test.db)
            .await?
            .len(),
        2
    );

    Ok(())
}

/// Tests that rows removed upstream disappear from the cache.
///
/// Expected: only the remaining reseller is stored after the second run
#[tokio::test]
async fn removed_rows_do_not_linger() -> Result<(), TestError> {
    let test = TestBuilder::new().with_cache_tables().build().await?;
    let repo = CacheRepository::new(&test.db, 1000);

    repo.replace_snapshot("north", &snapshot()).await?;

    let mut smaller = snapshot();
    smaller.resellers = vec![named(2, "Beta", "Yes")];
    repo.replace_snapshot("north", &smaller).await?;

    let resellers = repo
        .find_by_source::<entity::prelude::CacheReseller>("north")
        .await?;
    assert_eq!(resellers.len(), 1);
    assert_eq!(resellers[0].source_id, 2);
    assert!(resellers[0].is_enabled);

    Ok(())
}

/// Tests that the same snapshot written for two sources stays separated.
///
/// Expected: each source has its own copy of the colliding source ids
#[tokio::test]
async fn colliding_ids_are_kept_per_source() -> Result<(), TestError> {
    let test = TestBuilder::new().with_cache_tables().build().await?;
    let txn = test.db.begin().await?;
    let repo = CacheRepository::new(&txn, 1000);

    repo.replace_snapshot("north", &snapshot()).await?;
    repo.replace_snapshot("south", &snapshot()).await?;
    txn.commit().await?;

    let all = entity::prelude::CacheReseller::find().all(&test.db).await?;
    assert_eq!(all.len(), 4);
    assert_eq!(all.iter().filter(|r| r.source_name == "south").count(), 2);

    Ok(())
}
