use roster_core::{ListParams, ListResult, ServiceError};
use roster_sql::{Row, TxOutcome, Value};

use crate::model::{Person, PersonDraft};
use super::{row_exists, storage_err, RegistryService};

const FIELDS: &str = "id, first_name, last_name, email, ip_address";

impl RegistryService {
    pub fn list_persons(&self, params: &ListParams) -> Result<ListResult<Person>, ServiceError> {
        let limit = params.limit.min(500);
        let rows = self
            .sql
            .query(
                &format!("SELECT {} FROM people ORDER BY id LIMIT ?1 OFFSET ?2", FIELDS),
                &[
                    Value::Integer(limit as i64),
                    Value::Integer(params.offset as i64),
                ],
            )
            .map_err(|e| storage_err("list people", e))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(person_from_row(row)?);
        }
        let total = self.count_rows("people")?;

        Ok(ListResult { items, total })
    }

    pub fn get_person(&self, id: i64) -> Result<Person, ServiceError> {
        let rows = self
            .sql
            .query(
                &format!("SELECT {} FROM people WHERE id = ?1", FIELDS),
                &[Value::Integer(id)],
            )
            .map_err(|e| storage_err("get person", e))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("person {} not found", id)))?;
        person_from_row(row)
    }

    /// Insert a new person and return the store-assigned id.
    pub fn create_person(&self, draft: PersonDraft) -> Result<i64, ServiceError> {
        if draft.first_name.is_empty()
            || draft.last_name.is_empty()
            || draft.email.is_empty()
            || draft.ip_address.is_empty()
        {
            return Err(ServiceError::Validation(
                "first_name, last_name, email, and ip_address are all required".into(),
            ));
        }

        let mut id = 0;
        self.sql
            .with_tx(&mut |tx| {
                tx.exec(
                    "INSERT INTO people (first_name, last_name, email, ip_address)
                     VALUES (?1, ?2, ?3, ?4)",
                    &[
                        Value::Text(draft.first_name.clone()),
                        Value::Text(draft.last_name.clone()),
                        Value::Text(draft.email.clone()),
                        Value::Text(draft.ip_address.clone()),
                    ],
                )?;
                id = tx.last_insert_id();
                Ok(TxOutcome::Commit)
            })
            .map_err(|e| storage_err("create person", e))?;

        Ok(id)
    }

    /// Full-field replace of an existing person.
    ///
    /// Existence is re-checked inside the same transaction as the
    /// write: an absent id rolls back and reports not-found, never
    /// silently succeeding or creating a row.
    pub fn update_person(&self, id: i64, draft: PersonDraft) -> Result<(), ServiceError> {
        let outcome = self
            .sql
            .with_tx(&mut |tx| {
                if !row_exists(tx, "people", id)? {
                    return Ok(TxOutcome::Rollback);
                }
                tx.exec(
                    "UPDATE people SET first_name = ?1, last_name = ?2, email = ?3, ip_address = ?4
                     WHERE id = ?5",
                    &[
                        Value::Text(draft.first_name.clone()),
                        Value::Text(draft.last_name.clone()),
                        Value::Text(draft.email.clone()),
                        Value::Text(draft.ip_address.clone()),
                        Value::Integer(id),
                    ],
                )?;
                Ok(TxOutcome::Commit)
            })
            .map_err(|e| storage_err("update person", e))?;

        if outcome == TxOutcome::Rollback {
            return Err(ServiceError::NotFound(format!("person {} not found", id)));
        }
        Ok(())
    }

    /// Delete a person. Deleting an already-absent id always resolves
    /// to not-found.
    pub fn delete_person(&self, id: i64) -> Result<(), ServiceError> {
        let outcome = self
            .sql
            .with_tx(&mut |tx| {
                if !row_exists(tx, "people", id)? {
                    return Ok(TxOutcome::Rollback);
                }
                tx.exec("DELETE FROM people WHERE id = ?1", &[Value::Integer(id)])?;
                Ok(TxOutcome::Commit)
            })
            .map_err(|e| storage_err("delete person", e))?;

        if outcome == TxOutcome::Rollback {
            return Err(ServiceError::NotFound(format!("person {} not found", id)));
        }
        Ok(())
    }
}

fn person_from_row(row: &Row) -> Result<Person, ServiceError> {
    Ok(Person {
        id: row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Internal("missing id column".into()))?,
        first_name: row.get_str("first_name").unwrap_or_default().to_string(),
        last_name: row.get_str("last_name").unwrap_or_default().to_string(),
        email: row.get_str("email").unwrap_or_default().to_string(),
        ip_address: row.get_str("ip_address").unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roster_core::{ListParams, ServiceError};
    use roster_sql::{SQLStore, SqliteStore};

    use crate::model::PersonDraft;
    use crate::service::RegistryService;

    fn test_service() -> Arc<RegistryService> {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        RegistryService::new(sql).unwrap()
    }

    fn draft(first: &str, last: &str, email: &str, ip: &str) -> PersonDraft {
        PersonDraft {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            ip_address: ip.into(),
        }
    }

    #[test]
    fn create_get_delete_scenario() {
        let svc = test_service();

        let id = svc
            .create_person(draft("Ali", "Veli", "a@b.com", "10.0.0.1"))
            .unwrap();
        assert!(id > 0);

        let person = svc.get_person(id).unwrap();
        assert_eq!(person.first_name, "Ali");
        assert_eq!(person.last_name, "Veli");
        assert_eq!(person.email, "a@b.com");
        assert_eq!(person.ip_address, "10.0.0.1");

        svc.delete_person(id).unwrap();

        assert!(matches!(
            svc.get_person(id).unwrap_err(),
            ServiceError::NotFound(_)
        ));
        // A second delete is an explicit not-found, not a crash.
        assert!(matches!(
            svc.delete_person(id).unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn create_requires_all_fields() {
        let svc = test_service();
        let err = svc
            .create_person(draft("Ali", "", "a@b.com", "10.0.0.1"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.count_rows("people").unwrap(), 0);
    }

    #[test]
    fn update_replaces_all_fields() {
        let svc = test_service();
        let id = svc
            .create_person(draft("Ali", "Veli", "a@b.com", "10.0.0.1"))
            .unwrap();

        svc.update_person(id, draft("Harry", "Potter", "h@p.com", "10.0.0.2"))
            .unwrap();

        let person = svc.get_person(id).unwrap();
        assert_eq!(person.first_name, "Harry");
        assert_eq!(person.last_name, "Potter");
        assert_eq!(person.email, "h@p.com");
        assert_eq!(person.ip_address, "10.0.0.2");
    }

    #[test]
    fn update_nonexistent_is_not_found_and_creates_nothing() {
        let svc = test_service();
        let err = svc
            .update_person(999, draft("No", "One", "n@o.com", "0.0.0.0"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.count_rows("people").unwrap(), 0);
    }

    #[test]
    fn delete_nonexistent_leaves_rows_untouched() {
        let svc = test_service();
        svc.create_person(draft("Ali", "Veli", "a@b.com", "10.0.0.1"))
            .unwrap();

        let err = svc.delete_person(999).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.count_rows("people").unwrap(), 1);
    }

    #[test]
    fn list_respects_limit_and_reports_total() {
        let svc = test_service();
        for i in 0..3 {
            svc.create_person(draft("P", "Q", &format!("p{}@q.com", i), "1.1.1.1"))
                .unwrap();
        }

        let result = svc
            .list_persons(&ListParams {
                limit: 2,
                offset: 0,
            })
            .unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total, 3);

        // An empty table lists as empty, not as an error.
        let empty = test_service();
        let result = empty.list_persons(&ListParams::default()).unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 0);
    }
}
