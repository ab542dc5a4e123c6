use super::*;

/// Tests a backfill across two sources.
///
/// Expected: live rows and deduplicated identities staged, one merge script bound to the
/// cutoff, both stages deleted
#[tokio::test]
async fn stages_and_merges() {
    let fetcher = FakeSourceFetcher::new()
        .with_facts("north", vec![mock_record("north", "bob", 1, "2025-11-02")])
        .with_reseller_map("north", vec![mock_identity("ACME Corp", 7, "north")])
        .with_facts("south", vec![mock_record("south", "carol", 2, "2025-11-05")])
        .with_reseller_map(
            "south",
            vec![
                mock_identity("acme corp ", 12, "south"),
                mock_identity("Beta", 3, "south"),
            ],
        );
    let warehouse = RecordingWarehouse::new();
    let events = MemoryEventSink::new();
    let service = BackfillService::new(&fetcher, &warehouse, &events);
    let target = mock_target();

    let report = service
        .backfill(
            &[mock_source("north"), mock_source("south")],
            date("2025-10-31"),
            &legacy(),
            &target,
        )
        .await
        .unwrap();

    assert_eq!(
        report,
        BackfillReport {
            live_rows: 2,
            identities: 2,
        }
    );

    let loads = warehouse.loads();
    assert_eq!(loads.len(), 2);
    let (live_stage, live_csv, _) = &loads[0];
    let (map_stage, map_csv, _) = &loads[1];
    assert!(live_stage
        .table
        .starts_with("report_user_service_maria_stage_"));
    assert!(map_stage.table.starts_with("report_user_service_reseller_map_"));
    assert_eq!(live_csv.lines().count(), 3);
    assert_eq!(
        map_csv,
        "creator_norm,rs_userid,rs_name\nacme corp,7,north\nbeta,3,south\n"
    );

    let scripts = warehouse.scripts();
    let (sql, params) = &scripts[0];
    assert!(sql.starts_with("CREATE OR REPLACE TABLE `test-project.reports.report_user_service`"));
    assert!(sql.contains("FROM `test-project.reports.hspdata` h"));
    assert!(sql.contains(&format!("LEFT JOIN {} m", map_stage.quoted())));
    assert_eq!(
        params,
        &vec![QueryParameter::date("cutoff_date", date("2025-10-31"))]
    );

    assert_eq!(
        warehouse.deleted(),
        vec![live_stage.clone(), map_stage.clone()]
    );
    assert_eq!(events.kinds(), vec!["backfill_start", "backfill_success"]);

    let filters = fetcher.filters();
    assert_eq!(filters[0].1.start_date, Some(date("2025-10-31")));
}

/// Tests that an empty identity map still yields a typed stage table.
///
/// Expected: map stage created with the explicit schema instead of loaded
#[tokio::test]
async fn creates_empty_map_stage() {
    let fetcher =
        FakeSourceFetcher::new().with_facts("north", vec![mock_record("north", "bob", 1, "2025-11-02")]);
    let warehouse = RecordingWarehouse::new();
    let events = MemoryEventSink::new();
    let service = BackfillService::new(&fetcher, &warehouse, &events);

    service
        .backfill(
            &[mock_source("north")],
            date("2025-10-31"),
            &legacy(),
            &mock_target(),
        )
        .await
        .unwrap();

    assert_eq!(warehouse.loads().len(), 1);
    let created: Vec<_> = warehouse
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            WarehouseCall::CreateTable { table, columns } => Some((table, columns)),
            _ => None,
        })
        .collect();
    assert_eq!(created.len(), 1);
    assert!(created[0].0.table.starts_with("report_user_service_reseller_map_"));
    assert_eq!(created[0].1, vec!["creator_norm", "rs_userid", "rs_name"]);
}

/// Tests a cutoff with no live rows.
///
/// Expected: Err(Error::BackfillError), no merge, stages still deleted
#[tokio::test]
async fn fails_without_live_rows() {
    let fetcher = FakeSourceFetcher::new();
    let warehouse = RecordingWarehouse::new();
    let events = MemoryEventSink::new();
    let service = BackfillService::new(&fetcher, &warehouse, &events);

    let result = service
        .backfill(
            &[mock_source("north")],
            date("2025-10-31"),
            &legacy(),
            &mock_target(),
        )
        .await;

    assert!(matches!(
        result,
        Err(Error::BackfillError(BackfillError::NoLiveRows(_)))
    ));
    assert!(warehouse.scripts().is_empty());
    assert_eq!(warehouse.deleted().len(), 2);
    assert_eq!(events.kinds(), vec!["backfill_start", "backfill_error"]);
}

/// Tests that a failing source aborts the backfill.
///
/// Expected: Err(Error::SourceError) and nothing loaded
#[tokio::test]
async fn source_failure_aborts() {
    let fetcher = FakeSourceFetcher::new()
        .with_facts("north", vec![mock_record("north", "bob", 1, "2025-11-02")])
        .failing("south");
    let warehouse = RecordingWarehouse::new();
    let events = MemoryEventSink::new();
    let service = BackfillService::new(&fetcher, &warehouse, &events);

    let result = service
        .backfill(
            &[mock_source("north"), mock_source("south")],
            date("2025-10-31"),
            &legacy(),
            &mock_target(),
        )
        .await;

    assert!(matches!(result, Err(Error::SourceError(_))));
    assert!(warehouse.loads().is_empty());
    assert_eq!(warehouse.deleted().len(), 2);
}

/// Tests that a failing merge still removes both stages.
///
/// Expected: Err(Error::WarehouseError) and both stages deleted
#[tokio::test]
async fn deletes_stages_when_merge_fails() {
    let fetcher =
        FakeSourceFetcher::new().with_facts("north", vec![mock_record("north", "bob", 1, "2025-11-02")]);
    let warehouse = RecordingWarehouse::new().failing_execute("Table hspdata not found");
    let events = MemoryEventSink::new();
    let service = BackfillService::new(&fetcher, &warehouse, &events);

    let result = service
        .backfill(
            &[mock_source("north")],
            date("2025-10-31"),
            &legacy(),
            &mock_target(),
        )
        .await;

    assert!(matches!(result, Err(Error::WarehouseError(_))));
    assert_eq!(warehouse.deleted().len(), 2);
    let error = events.find("backfill_error").unwrap();
    assert!(error.data["error"]
        .as_str()
        .unwrap()
        .contains("hspdata not found"));
}
