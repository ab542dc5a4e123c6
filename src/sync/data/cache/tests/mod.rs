use sea_orm::{ActiveValue, EntityTrait, TransactionTrait};
use sync_test_utils::prelude::*;

use super::*;
use crate::sync::model::reference::{AccessRow, NamedRow, ResellerPermitRow, ServiceRow};

mod replace_for_source;
mod replace_snapshot;

fn named(source_id: i64, name: &str, enabled: &str) -> NamedRow {
    NamedRow {
        source_id,
        name: Some(name.to_string()),
        is_enable: Some(enabled.to_string()),
    }
}

fn access(source_id: i64, subject_id: i64, target_id: i64, checked: &str) -> AccessRow {
    AccessRow {
        source_id,
        subject_id: Some(subject_id),
        target_id: Some(target_id),
        checked: Some(checked.to_string()),
    }
}

fn visp_model(source_name: &str, source_id: i64) -> entity::cache_visp::ActiveModel {
    entity::cache_visp::ActiveModel {
        source_name: ActiveValue::Set(source_name.to_string()),
        source_id: ActiveValue::Set(source_id),
        name: ActiveValue::Set(format!("VISP {}", source_id)),
        is_enabled: ActiveValue::Set(true),
        ..Default::default()
    }
}
