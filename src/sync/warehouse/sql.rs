//! GoogleSQL statements that change target tables.
//!
//! Each builder returns one script that the warehouse evaluates atomically. Dates are
//! bound as named `DATE` parameters, never spliced into the text.

use crate::sync::warehouse::{TableId, FACT_SCHEMA};

fn fact_columns() -> String {
    FACT_SCHEMA
        .iter()
        .map(|field| field.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Replaces the rows of `target` created inside the window with every row of `stage`.
///
/// Binds `@start_date`, and `@end_date` when `bounded` is set. Without an end date the
/// window is open-ended.
pub fn window_swap(target: &TableId, stage: &TableId, bounded: bool) -> String {
    let columns = fact_columns();
    let end_clause = if bounded {
        " AND CreateDate <= @end_date"
    } else {
        ""
    };

    format!(
        "BEGIN TRANSACTION;\n\
         DELETE FROM {target} WHERE CreateDate >= @start_date{end_clause};\n\
         INSERT INTO {target} ({columns})\n\
         SELECT {columns} FROM {stage};\n\
         COMMIT TRANSACTION;",
        target = target.quoted(),
        stage = stage.quoted(),
    )
}

/// Rebuilds `target` from live rows on or after `@cutoff_date` plus legacy rows before it.
///
/// Legacy rows whose service id also appears among the live rows are dropped. Legacy
/// creators are resolved through the reseller map on their trimmed lowercase name and keep
/// null identity fields when unresolved. Every cast is a `SAFE_CAST`, so malformed legacy
/// values become null.
pub fn backfill(
    target: &TableId,
    legacy: &TableId,
    live_stage: &TableId,
    map_stage: &TableId,
) -> String {
    format!(
        r#"CREATE OR REPLACE TABLE {target} AS
WITH live AS (
  SELECT
    SAFE_CAST(CreateDate AS DATE) AS CreateDate,
    SAFE_CAST(rs_userid AS INT64) AS rs_userid,
    rs_username,
    rs_name,
    SAFE_CAST(UserServiceID AS INT64) AS UserServiceID,
    username,
    ServiceName,
    SAFE_CAST(ServicePrice AS FLOAT64) AS ServicePrice,
    SAFE_CAST(Package AS FLOAT64) AS Package,
    ServiceStatus,
    SAFE_CAST(StartDate AS DATE) AS StartDate,
    SAFE_CAST(EndDate AS DATE) AS EndDate
  FROM {live}
  WHERE SAFE_CAST(CreateDate AS DATE) >= @cutoff_date
),
legacy AS (
  SELECT
    SAFE_CAST(h.CreatDate AS DATE) AS CreateDate,
    m.rs_userid AS rs_userid,
    h.Creator AS rs_username,
    m.rs_name AS rs_name,
    SAFE_CAST(h.UserServiceId AS INT64) AS UserServiceID,
    h.Username AS username,
    h.ServiceName AS ServiceName,
    SAFE_CAST(h.ServicePrice AS FLOAT64) AS ServicePrice,
    SAFE_CAST(h.Package AS FLOAT64) AS Package,
    h.ServiceStatus AS ServiceStatus,
    SAFE_CAST(h.StartDate AS DATE) AS StartDate,
    SAFE_CAST(h.EndDate AS DATE) AS EndDate
  FROM {legacy} h
  LEFT JOIN {map} m
    ON LOWER(TRIM(h.Creator)) = m.creator_norm
  LEFT JOIN {live} ls
    ON SAFE_CAST(h.UserServiceId AS INT64) = SAFE_CAST(ls.UserServiceID AS INT64)
  WHERE SAFE_CAST(h.CreatDate AS DATE) < @cutoff_date
    AND ls.UserServiceID IS NULL
)
SELECT
  ROW_NUMBER() OVER (
    ORDER BY username ASC NULLS LAST, UserServiceID ASC NULLS LAST, CreateDate DESC NULLS LAST
  ) AS id,
  CreateDate,
  rs_userid,
  rs_username,
  rs_name,
  UserServiceID,
  username,
  ServiceName,
  ServicePrice,
  Package,
  ServiceStatus,
  StartDate,
  EndDate
FROM (
  SELECT * FROM live
  UNION ALL
  SELECT * FROM legacy
)"#,
        target = target.quoted(),
        legacy = legacy.quoted(),
        live = live_stage.quoted(),
        map = map_stage.quoted(),
    )
}
