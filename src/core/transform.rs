use crate::domain::model::{ProjectedDataset, Record};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;

/// Keeps only `fields` from every record, preserving row order.
///
/// Fails on the first record that lacks one of the fields. A field that is
/// present with a `null` value counts as present.
pub fn project_fields(records: Vec<Record>, fields: &[String]) -> Result<ProjectedDataset> {
    let mut projected = Vec::with_capacity(records.len());

    for (index, mut record) in records.into_iter().enumerate() {
        let mut data = HashMap::with_capacity(fields.len());
        for field in fields {
            let value = record
                .data
                .remove(field)
                .ok_or_else(|| EtlError::MissingFieldError {
                    index,
                    field: field.clone(),
                })?;
            data.insert(field.clone(), value);
        }
        projected.push(Record { data });
    }

    Ok(ProjectedDataset {
        columns: fields.to_vec(),
        records: projected,
    })
}
