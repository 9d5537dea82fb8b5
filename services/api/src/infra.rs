use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use staff_compliance::training::directory::employee_key;
use staff_compliance::training::{
    parse_reporting_date, DirectoryError, PersonRecord, StaffDirectory,
};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory kept in process memory, keyed by trimmed employee id.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStaffDirectory {
    records: Arc<Mutex<BTreeMap<String, PersonRecord>>>,
}

impl InMemoryStaffDirectory {
    /// Seed from imported roster rows. Rows without an employee id cannot be
    /// addressed later and are skipped; the count of skipped rows is returned.
    pub(crate) fn seeded(records: Vec<PersonRecord>) -> (Self, usize) {
        let directory = Self::default();
        let mut skipped = 0;
        if let Ok(mut guard) = directory.records.lock() {
            for record in records {
                match employee_key(&record).map(str::to_owned) {
                    Some(id) => {
                        guard.insert(id, record);
                    }
                    None => skipped += 1,
                }
            }
        }
        (directory, skipped)
    }

    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<String, PersonRecord>>, DirectoryError> {
        self.records
            .lock()
            .map_err(|_| DirectoryError::Unavailable("directory mutex poisoned".to_string()))
    }
}

impl StaffDirectory for InMemoryStaffDirectory {
    fn list(&self) -> Result<Vec<PersonRecord>, DirectoryError> {
        Ok(self.guard()?.values().cloned().collect())
    }

    fn fetch(&self, employee_id: &str) -> Result<Option<PersonRecord>, DirectoryError> {
        Ok(self.guard()?.get(employee_id).cloned())
    }

    fn upsert(&self, record: PersonRecord) -> Result<(), DirectoryError> {
        let id = employee_key(&record)
            .map(str::to_owned)
            .ok_or(DirectoryError::MissingIdentifier)?;
        self.guard()?.insert(id, record);
        Ok(())
    }
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_reporting_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, id: Option<&str>) -> PersonRecord {
        let record = PersonRecord::new(name).with_role("Ward 3", "Staff Nurse", true);
        match id {
            Some(id) => record.with_employee_id(id),
            None => record,
        }
    }

    #[test]
    fn seeding_skips_rows_without_identifier() {
        let (directory, skipped) = InMemoryStaffDirectory::seeded(vec![
            person("Ada", Some(" E10 ")),
            person("Ben", None),
            person("Cy", Some("E11")),
        ]);

        assert_eq!(skipped, 1);
        let listed = directory.list().expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(
            directory.fetch("E10").expect("fetch").map(|r| r.full_name),
            Some("Ada".to_string())
        );
    }

    #[test]
    fn upsert_replaces_existing_record() {
        let directory = InMemoryStaffDirectory::default();
        directory
            .upsert(person("Ada", Some("E10")))
            .expect("insert");
        directory
            .upsert(person("Ada Lovelace", Some("E10")))
            .expect("replace");

        let listed = directory.list().expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].full_name, "Ada Lovelace");
    }

    #[test]
    fn upsert_rejects_blank_identifier() {
        let directory = InMemoryStaffDirectory::default();
        let err = directory
            .upsert(person("Ada", Some("   ")))
            .expect_err("blank id rejected");
        assert!(matches!(err, DirectoryError::MissingIdentifier));
    }
}
