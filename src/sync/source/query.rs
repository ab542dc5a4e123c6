//! Fixed source queries.
//!
//! Column aliases match the field names of the `FromQueryResult` row types in
//! [`crate::sync::model`]. Identifiers are cast to signed integers and text columns to CHAR
//! so decoding does not depend on the exact column types of each source deployment.

use sea_orm::{DbBackend, Statement, Value};

use crate::sync::source::FactFilter;

pub const RESELLERS: &str = "SELECT CAST(Reseller_Id AS SIGNED) AS source_id, \
    CAST(ResellerName AS CHAR) AS name, CAST(ISEnable AS CHAR) AS is_enable \
    FROM Hreseller";

pub const VISPS: &str = "SELECT CAST(Visp_Id AS SIGNED) AS source_id, \
    CAST(VispName AS CHAR) AS name, CAST(ISEnable AS CHAR) AS is_enable \
    FROM Hvisp";

pub const CENTERS: &str = "SELECT CAST(Center_Id AS SIGNED) AS source_id, \
    CAST(CenterName AS CHAR) AS name, CAST(ISEnable AS CHAR) AS is_enable, \
    CAST(VispAccess AS CHAR) AS visp_access \
    FROM Hcenter";

pub const SUPPORTERS: &str = "SELECT CAST(Supporter_Id AS SIGNED) AS source_id, \
    CAST(SupporterName AS CHAR) AS name, CAST(ISEnable AS CHAR) AS is_enable \
    FROM Hsupporter";

pub const STATUSES: &str = "SELECT CAST(Status_Id AS SIGNED) AS source_id, \
    CAST(StatusName AS CHAR) AS name, CAST(ISEnable AS CHAR) AS is_enable, \
    CAST(ResellerAccess AS CHAR) AS reseller_access, CAST(VispAccess AS CHAR) AS visp_access \
    FROM Hstatus";

pub const SERVICES: &str = "SELECT CAST(Service_Id AS SIGNED) AS source_id, \
    CAST(ServiceName AS CHAR) AS name, CAST(ISEnable AS CHAR) AS is_enable, \
    CAST(IsDel AS CHAR) AS is_del, CAST(ResellerAccess AS CHAR) AS reseller_access, \
    CAST(VispAccess AS CHAR) AS visp_access \
    FROM Hservice";

pub const RESELLER_PERMITS: &str = "SELECT CAST(Reseller_Permit_Id AS SIGNED) AS source_id, \
    CAST(Reseller_Id AS SIGNED) AS reseller_id, CAST(Visp_Id AS SIGNED) AS visp_id, \
    CAST(PermitItem_Id AS SIGNED) AS permit_item_id, CAST(ISPermit AS CHAR) AS is_permit \
    FROM Hreseller_permit";

pub const SERVICE_RESELLER_ACCESS: &str = "SELECT CAST(Service_ResellerAccess_Id AS SIGNED) AS source_id, \
    CAST(Service_Id AS SIGNED) AS subject_id, \
    CAST(Reseller_Id AS SIGNED) AS target_id, CAST(Checked AS CHAR) AS checked \
    FROM Hservice_reselleraccess";

pub const STATUS_RESELLER_ACCESS: &str = "SELECT CAST(Status_ResellerAccess_Id AS SIGNED) AS source_id, \
    CAST(Status_Id AS SIGNED) AS subject_id, \
    CAST(Reseller_Id AS SIGNED) AS target_id, CAST(Checked AS CHAR) AS checked \
    FROM Hstatus_reselleraccess";

pub const SERVICE_VISP_ACCESS: &str = "SELECT CAST(Service_VispAccess_Id AS SIGNED) AS source_id, \
    CAST(Service_Id AS SIGNED) AS subject_id, \
    CAST(Visp_Id AS SIGNED) AS target_id, CAST(Checked AS CHAR) AS checked \
    FROM Hservice_vispaccess";

pub const STATUS_VISP_ACCESS: &str = "SELECT CAST(Status_VispAccess_Id AS SIGNED) AS source_id, \
    CAST(Status_Id AS SIGNED) AS subject_id, \
    CAST(Visp_Id AS SIGNED) AS target_id, CAST(Checked AS CHAR) AS checked \
    FROM Hstatus_vispaccess";

pub const CENTER_VISP_ACCESS: &str = "SELECT CAST(Center_VispAccess_Id AS SIGNED) AS source_id, \
    CAST(Center_Id AS SIGNED) AS subject_id, \
    CAST(Visp_Id AS SIGNED) AS target_id, CAST(Checked AS CHAR) AS checked \
    FROM Hcenter_vispaccess";

pub const RESELLER_MAP: &str = "SELECT CAST(Reseller_Id AS SIGNED) AS reseller_id, \
    CAST(ResellerName AS CHAR) AS reseller_name \
    FROM Hreseller \
    WHERE ResellerName IS NOT NULL AND ResellerName <> ''";

const USER_SERVICES: &str = "SELECT
    DATE_FORMAT(TName.CDT, '%Y-%m-%d') AS create_date,
    CAST(TName.Creator_Id AS SIGNED) AS rs_userid,
    CAST(Hrc.ResellerName AS CHAR) AS rs_username,
    CAST(TName.User_ServiceBase_Id AS SIGNED) AS user_service_id,
    CAST(Hu.Username AS CHAR) AS username,
    CAST(Hse.ServiceName AS CHAR) AS service_name,
    CAST(TName.ServicePrice AS DOUBLE) AS service_price,
    CAST(Hse.STrA AS SIGNED) AS s_tra,
    CAST(Hse.MTrA AS SIGNED) AS m_tra,
    CAST(Hse.DTrA AS SIGNED) AS d_tra,
    CAST(Hse.YTrA AS SIGNED) AS y_tra,
    CAST(Hse.ExtraTraffic AS SIGNED) AS extra_traffic,
    CAST(TName.ServiceStatus AS CHAR) AS service_status,
    DATE_FORMAT(TName.StartDate, '%Y-%m-%d') AS start_date,
    DATE_FORMAT(TName.EndDate, '%Y-%m-%d') AS end_date
FROM Huser_servicebase TName
JOIN Huser Hu ON TName.User_Id = Hu.User_Id
LEFT JOIN Hreseller Hrc ON TName.Creator_Id = Hrc.Reseller_Id
LEFT JOIN Hservice Hse ON TName.Service_Id = Hse.Service_Id";

/// Statement for a fixed, parameterless query.
pub fn fixed(sql: &str) -> Statement {
    Statement::from_string(DbBackend::MySql, sql)
}

/// Builds the fact query for `filter`, newest rows first.
pub fn user_services(filter: &FactFilter) -> Statement {
    let mut conditions = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(days) = filter.days.filter(|days| *days > 0) {
        conditions.push("TName.CDT >= DATE_SUB(CURDATE(), INTERVAL ? DAY)");
        values.push(i64::from(days).into());
    }

    if let Some(start) = filter.start_date {
        conditions.push("TName.CDT >= ?");
        values.push(start.into());
    }

    // CDT is a timestamp; compare against the following midnight to keep the whole end day.
    if let Some(next_day) = filter.end_date.and_then(|end| end.succ_opt()) {
        conditions.push("TName.CDT < ?");
        values.push(next_day.into());
    }

    let mut sql = USER_SERVICES.to_string();
    if !conditions.is_empty() {
        sql.push_str("\nWHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str("\nORDER BY TName.CDT DESC");
    if let Some(limit) = filter.limit.filter(|limit| *limit > 0) {
        sql.push_str(&format!("\nLIMIT {limit}"));
    }

    Statement::from_sql_and_values(DbBackend::MySql, sql, values)
}
