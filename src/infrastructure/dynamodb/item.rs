//! Conversion between stored items and sparse records.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::domain::entities::SparseRecord;

pub type Item = HashMap<String, AttributeValue>;

/// Converts stored attributes to a record. Only string attributes are kept.
pub fn item_to_record(item: &Item) -> SparseRecord {
    item.iter()
        .filter_map(|(name, value)| {
            value
                .as_s()
                .ok()
                .map(|s| (name.as_str(), s.as_str()))
        })
        .collect()
}

pub fn record_to_item(record: &SparseRecord) -> Item {
    record
        .iter()
        .map(|(name, value)| (name.to_string(), AttributeValue::S(value.to_string())))
        .collect()
}
