//! Raw Notion records → typed records → title edges
//!
//! Every extractor walks one property chain and returns either the typed
//! value or a [`TransformError`] naming the exact path that failed. Nothing
//! here skips a bad record: the first failure aborts the whole batch.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::TransformError;
use crate::model::{Edge, PropertySchema, Record};

/// Look up `key` on a JSON object, reporting `path` on failure.
fn field<'a>(
    value: &'a Value,
    key: &str,
    path: &str,
    index: usize,
) -> Result<&'a Value, TransformError> {
    let object = value.as_object().ok_or_else(|| TransformError::WrongType {
        index,
        path: parent_path(path).to_string(),
        expected: "an object",
    })?;
    object.get(key).ok_or_else(|| TransformError::MissingField {
        index,
        path: path.to_string(),
    })
}

fn parent_path(path: &str) -> &str {
    path.rsplit_once('.').map_or("<record>", |(parent, _)| parent)
}

fn as_array<'a>(
    value: &'a Value,
    path: &str,
    index: usize,
) -> Result<&'a Vec<Value>, TransformError> {
    value.as_array().ok_or_else(|| TransformError::WrongType {
        index,
        path: path.to_string(),
        expected: "an array",
    })
}

fn as_str<'a>(value: &'a Value, path: &str, index: usize) -> Result<&'a str, TransformError> {
    value.as_str().ok_or_else(|| TransformError::WrongType {
        index,
        path: path.to_string(),
        expected: "a string",
    })
}

/// The record's own page id (`id`).
pub fn extract_id(raw: &Value, index: usize) -> Result<String, TransformError> {
    let id = field(raw, "id", "id", index)?;
    Ok(as_str(id, "id", index)?.to_string())
}

/// First plain-text run of `properties.<title>.title`.
pub fn extract_title(
    raw: &Value,
    index: usize,
    schema: &PropertySchema,
) -> Result<String, TransformError> {
    let properties = field(raw, "properties", "properties", index)?;

    let prop_path = format!("properties.{}", schema.title_property);
    let prop = field(properties, &schema.title_property, &prop_path, index)?;

    let runs_path = format!("{prop_path}.title");
    let runs = as_array(field(prop, "title", &runs_path, index)?, &runs_path, index)?;

    let first = runs.first().ok_or_else(|| TransformError::EmptyTitle {
        index,
        path: runs_path.clone(),
    })?;

    let text_path = format!("{runs_path}[0].plain_text");
    let text = as_str(field(first, "plain_text", &text_path, index)?, &text_path, index)?;
    if text.is_empty() {
        return Err(TransformError::EmptyTitle { index, path: text_path });
    }
    Ok(text.to_string())
}

/// Page ids listed in `properties.<children>.relation`, in order.
pub fn extract_children(
    raw: &Value,
    index: usize,
    schema: &PropertySchema,
) -> Result<Vec<String>, TransformError> {
    let properties = field(raw, "properties", "properties", index)?;

    let prop_path = format!("properties.{}", schema.children_property);
    let prop = field(properties, &schema.children_property, &prop_path, index)?;

    let relation_path = format!("{prop_path}.relation");
    let relation = as_array(
        field(prop, "relation", &relation_path, index)?,
        &relation_path,
        index,
    )?;

    relation
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let id_path = format!("{relation_path}[{i}].id");
            let id = field(entry, "id", &id_path, index)?;
            Ok(as_str(id, &id_path, index)?.to_string())
        })
        .collect()
}

/// Validate one raw record against the schema.
pub fn parse_record(
    raw: &Value,
    index: usize,
    schema: &PropertySchema,
) -> Result<Record, TransformError> {
    Ok(Record {
        id: extract_id(raw, index)?,
        title: extract_title(raw, index, schema)?,
        children: extract_children(raw, index, schema)?,
    })
}

/// Validate a whole result set. Fails on the first malformed record.
pub fn parse_records(
    raw: &[Value],
    schema: &PropertySchema,
) -> Result<Vec<Record>, TransformError> {
    let records = raw
        .iter()
        .enumerate()
        .map(|(index, value)| parse_record(value, index, schema))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Parsed {} records", records.len());
    Ok(records)
}

/// id → title lookup. A repeated id keeps the last title seen.
pub fn id_to_title(records: &[Record]) -> HashMap<String, String> {
    records
        .iter()
        .map(|record| (record.id.clone(), record.title.clone()))
        .collect()
}

/// One edge per (record, child) pair, child order preserved.
///
/// Duplicates are kept. Any child id missing from the result set fails the
/// whole transformation; no partial edge list is returned.
pub fn build_edges(records: &[Record]) -> Result<Vec<Edge>, TransformError> {
    let titles = id_to_title(records);
    let mut edges = Vec::with_capacity(records.iter().map(|r| r.children.len()).sum());

    for record in records {
        let parent = titles
            .get(&record.id)
            .cloned()
            .unwrap_or_else(|| record.title.clone());

        for child_id in &record.children {
            let child = titles.get(child_id).ok_or_else(|| TransformError::UnknownChild {
                parent: record.title.clone(),
                child_id: child_id.clone(),
            })?;
            edges.push(Edge::new(parent.clone(), child.clone()));
        }
    }

    tracing::debug!("Built {} edges from {} records", edges.len(), records.len());
    Ok(edges)
}
