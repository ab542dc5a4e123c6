//! Conversion of fetched reference rows into cache active models.
//!
//! Each converter tags rows with the source name and keeps only the first row for each
//! natural key: `source_id` for primary entities, the two linked ids for access rows, and
//! `(reseller_id, visp_id, permit_item_id)` for reseller permits.

use std::{collections::HashSet, hash::Hash};

use sea_orm::ActiveValue;

use crate::sync::model::{
    reference::{
        access_or_all, is_yes, AccessRow, CenterRow, NamedRow, ResellerPermitRow, ServiceRow,
        StatusRow,
    },
    user_service::normalize_creator,
};

fn first_by_key<'r, T, K, F>(rows: &'r [T], key: F) -> impl Iterator<Item = &'r T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K + 'r,
{
    let mut seen = HashSet::new();
    rows.iter().filter(move |row| seen.insert(key(*row)))
}

fn access_key(row: &AccessRow) -> (i64, i64) {
    (row.subject_id.unwrap_or(0), row.target_id.unwrap_or(0))
}

pub fn resellers(source_name: &str, rows: &[NamedRow]) -> Vec<entity::cache_reseller::ActiveModel> {
    first_by_key(rows, |r| r.source_id)
        .map(|r| {
            let name = r.name.clone().unwrap_or_default();
            entity::cache_reseller::ActiveModel {
                source_name: ActiveValue::Set(source_name.to_string()),
                source_id: ActiveValue::Set(r.source_id),
                name_norm: ActiveValue::Set(normalize_creator(&name)),
                name: ActiveValue::Set(name),
                is_enabled: ActiveValue::Set(is_yes(r.is_enable.as_deref())),
                ..Default::default()
            }
        })
        .collect()
}

pub fn visps(source_name: &str, rows: &[NamedRow]) -> Vec<entity::cache_visp::ActiveModel> {
    first_by_key(rows, |r| r.source_id)
        .map(|r| entity::cache_visp::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            name: ActiveValue::Set(r.name.clone().unwrap_or_default()),
            is_enabled: ActiveValue::Set(is_yes(r.is_enable.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn centers(source_name: &str, rows: &[CenterRow]) -> Vec<entity::cache_center::ActiveModel> {
    first_by_key(rows, |r| r.source_id)
        .map(|r| entity::cache_center::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            name: ActiveValue::Set(r.name.clone().unwrap_or_default()),
            is_enabled: ActiveValue::Set(is_yes(r.is_enable.as_deref())),
            visp_access: ActiveValue::Set(access_or_all(r.visp_access.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn supporters(
    source_name: &str,
    rows: &[NamedRow],
) -> Vec<entity::cache_supporter::ActiveModel> {
    first_by_key(rows, |r| r.source_id)
        .map(|r| entity::cache_supporter::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            name: ActiveValue::Set(r.name.clone().unwrap_or_default()),
            is_enabled: ActiveValue::Set(is_yes(r.is_enable.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn statuses(source_name: &str, rows: &[StatusRow]) -> Vec<entity::cache_status::ActiveModel> {
    first_by_key(rows, |r| r.source_id)
        .map(|r| entity::cache_status::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            name: ActiveValue::Set(r.name.clone().unwrap_or_default()),
            is_enabled: ActiveValue::Set(is_yes(r.is_enable.as_deref())),
            reseller_access: ActiveValue::Set(access_or_all(r.reseller_access.as_deref())),
            visp_access: ActiveValue::Set(access_or_all(r.visp_access.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn services(source_name: &str, rows: &[ServiceRow]) -> Vec<entity::cache_service::ActiveModel> {
    first_by_key(rows, |r| r.source_id)
        .map(|r| entity::cache_service::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            name: ActiveValue::Set(r.name.clone().unwrap_or_default()),
            is_enabled: ActiveValue::Set(is_yes(r.is_enable.as_deref())),
            is_deleted: ActiveValue::Set(is_yes(r.is_del.as_deref())),
            reseller_access: ActiveValue::Set(access_or_all(r.reseller_access.as_deref())),
            visp_access: ActiveValue::Set(access_or_all(r.visp_access.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn reseller_permits(
    source_name: &str,
    rows: &[ResellerPermitRow],
) -> Vec<entity::cache_reseller_permit::ActiveModel> {
    first_by_key(rows, |r| {
        (r.reseller_id.unwrap_or(0), r.visp_id.unwrap_or(0), r.permit_item_id)
    })
    .map(|r| entity::cache_reseller_permit::ActiveModel {
        source_name: ActiveValue::Set(source_name.to_string()),
        source_id: ActiveValue::Set(r.source_id),
        reseller_id: ActiveValue::Set(r.reseller_id.unwrap_or(0)),
        visp_id: ActiveValue::Set(r.visp_id.unwrap_or(0)),
        permit_item_id: ActiveValue::Set(r.permit_item_id),
        is_permit: ActiveValue::Set(is_yes(r.is_permit.as_deref())),
        ..Default::default()
    })
    .collect()
}

pub fn service_reseller_access(
    source_name: &str,
    rows: &[AccessRow],
) -> Vec<entity::cache_service_reseller_access::ActiveModel> {
    first_by_key(rows, access_key)
        .map(|r| entity::cache_service_reseller_access::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            service_id: ActiveValue::Set(r.subject_id.unwrap_or(0)),
            reseller_id: ActiveValue::Set(r.target_id.unwrap_or(0)),
            checked: ActiveValue::Set(is_yes(r.checked.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn status_reseller_access(
    source_name: &str,
    rows: &[AccessRow],
) -> Vec<entity::cache_status_reseller_access::ActiveModel> {
    first_by_key(rows, access_key)
        .map(|r| entity::cache_status_reseller_access::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            status_id: ActiveValue::Set(r.subject_id.unwrap_or(0)),
            reseller_id: ActiveValue::Set(r.target_id.unwrap_or(0)),
            checked: ActiveValue::Set(is_yes(r.checked.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn service_visp_access(
    source_name: &str,
    rows: &[AccessRow],
) -> Vec<entity::cache_service_visp_access::ActiveModel> {
    first_by_key(rows, access_key)
        .map(|r| entity::cache_service_visp_access::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            service_id: ActiveValue::Set(r.subject_id.unwrap_or(0)),
            visp_id: ActiveValue::Set(r.target_id.unwrap_or(0)),
            checked: ActiveValue::Set(is_yes(r.checked.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn status_visp_access(
    source_name: &str,
    rows: &[AccessRow],
) -> Vec<entity::cache_status_visp_access::ActiveModel> {
    first_by_key(rows, access_key)
        .map(|r| entity::cache_status_visp_access::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            status_id: ActiveValue::Set(r.subject_id.unwrap_or(0)),
            visp_id: ActiveValue::Set(r.target_id.unwrap_or(0)),
            checked: ActiveValue::Set(is_yes(r.checked.as_deref())),
            ..Default::default()
        })
        .collect()
}

pub fn center_visp_access(
    source_name: &str,
    rows: &[AccessRow],
) -> Vec<entity::cache_center_visp_access::ActiveModel> {
    first_by_key(rows, access_key)
        .map(|r| entity::cache_center_visp_access::ActiveModel {
            source_name: ActiveValue::Set(source_name.to_string()),
            source_id: ActiveValue::Set(r.source_id),
            center_id: ActiveValue::Set(r.subject_id.unwrap_or(0)),
            visp_id: ActiveValue::Set(r.target_id.unwrap_or(0)),
            checked: ActiveValue::Set(is_yes(r.checked.as_deref())),
            ..Default::default()
        })
        .collect()
}
