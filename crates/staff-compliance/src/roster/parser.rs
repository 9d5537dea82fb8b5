use super::normalizer::{normalize_header, parse_clinical_flag};
use super::RosterImportError;
use crate::training::domain::PersonRecord;
use std::io::Read;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    FullName,
    Department,
    JobTitle,
    Clinical,
    EmployeeId,
    Completion(usize),
}

fn identity_column(key: &str) -> Option<Column> {
    match key {
        "full_name" | "name" | "staff_name" => Some(Column::FullName),
        "department" | "dept" | "ward" => Some(Column::Department),
        "job_title" | "role" | "position" => Some(Column::JobTitle),
        "clinical" | "is_clinical" | "staff_type" => Some(Column::Clinical),
        "employee_id" | "id" | "staff_id" | "employee_number" => Some(Column::EmployeeId),
        _ => None,
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<PersonRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut completion_keys = Vec::new();
    let columns: Vec<Column> = headers
        .iter()
        .map(|header| {
            let key = normalize_header(header);
            identity_column(&key).unwrap_or_else(|| {
                completion_keys.push(key);
                Column::Completion(completion_keys.len() - 1)
            })
        })
        .collect();

    if !columns.contains(&Column::FullName) {
        return Err(RosterImportError::MissingColumn("full name"));
    }

    let mut records = Vec::new();
    for (line, row) in csv_reader.records().enumerate() {
        let row = row?;
        let mut record = PersonRecord::default();

        for (column, value) in columns.iter().zip(row.iter()) {
            match column {
                Column::FullName => record.full_name = value.to_string(),
                Column::Department => record.department = value.to_string(),
                Column::JobTitle => record.job_title = value.to_string(),
                Column::Clinical => record.is_clinical = parse_clinical_flag(value),
                Column::EmployeeId if !value.is_empty() => {
                    record.employee_id = Some(value.to_string())
                }
                Column::EmployeeId => {}
                Column::Completion(index) => {
                    let key = &completion_keys[*index];
                    if !value.is_empty() && !key.is_empty() {
                        record.completions.insert(key.clone(), value.to_string());
                    }
                }
            }
        }

        if record.full_name.is_empty() {
            debug!(line = line + 2, "skipping roster row without a name");
            continue;
        }

        records.push(record);
    }

    Ok(records)
}
