use super::domain::PersonRecord;

/// Source of staff records, implemented by whatever record store the
/// deployment uses. The evaluation engine never calls this directly.
pub trait StaffDirectory: Send + Sync {
    fn list(&self) -> Result<Vec<PersonRecord>, DirectoryError>;
    fn fetch(&self, employee_id: &str) -> Result<Option<PersonRecord>, DirectoryError>;
    fn upsert(&self, record: PersonRecord) -> Result<(), DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("staff record not found")]
    NotFound,
    #[error("staff record has no employee id")]
    MissingIdentifier,
    #[error("staff directory unavailable: {0}")]
    Unavailable(String),
}

/// Trimmed, non-empty employee id of a record.
pub fn employee_key(record: &PersonRecord) -> Option<&str> {
    record
        .employee_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}
