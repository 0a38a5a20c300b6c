use roster_core::{ListParams, ListResult, Role, ServiceError};
use roster_sql::{Row, TxOutcome, Value};

use crate::model::{User, UserDraft};
use super::{row_exists, storage_err, RegistryService};

const FIELDS: &str = "id, username, email, password, role";

impl RegistryService {
    pub fn list_users(&self, params: &ListParams) -> Result<ListResult<User>, ServiceError> {
        let limit = params.limit.min(500);
        let rows = self
            .sql
            .query(
                &format!("SELECT {} FROM users ORDER BY id LIMIT ?1 OFFSET ?2", FIELDS),
                &[
                    Value::Integer(limit as i64),
                    Value::Integer(params.offset as i64),
                ],
            )
            .map_err(|e| storage_err("list users", e))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(user_from_row(row)?);
        }
        let total = self.count_rows("users")?;

        Ok(ListResult { items, total })
    }

    pub fn get_user(&self, id: i64) -> Result<User, ServiceError> {
        let rows = self
            .sql
            .query(
                &format!("SELECT {} FROM users WHERE id = ?1", FIELDS),
                &[Value::Integer(id)],
            )
            .map_err(|e| storage_err("get user", e))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("user {} not found", id)))?;
        user_from_row(row)
    }

    /// Look up a user by username. `Ok(None)` when no row matches.
    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        let rows = self
            .sql
            .query(
                &format!("SELECT {} FROM users WHERE username = ?1", FIELDS),
                &[Value::Text(username.to_string())],
            )
            .map_err(|e| storage_err("find user by username", e))?;

        rows.first().map(user_from_row).transpose()
    }

    /// Insert a new user and return the store-assigned id.
    ///
    /// The stored role is always `user`: this path must never let a
    /// caller mint an elevated role. Promotion happens through update,
    /// which the verb policy restricts to admins.
    pub fn create_user(&self, draft: UserDraft) -> Result<i64, ServiceError> {
        if draft.username.is_empty() {
            return Err(ServiceError::Validation("username is required".into()));
        }

        let mut id = 0;
        let result = self.sql.with_tx(&mut |tx| {
            tx.exec(
                "INSERT INTO users (username, email, password, role)
                 VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::Text(draft.username.clone()),
                    Value::Text(draft.email.clone()),
                    Value::Text(draft.password.clone()),
                    Value::Text(Role::User.as_str().to_string()),
                ],
            )?;
            id = tx.last_insert_id();
            Ok(TxOutcome::Commit)
        });

        match result {
            Ok(_) => Ok(id),
            Err(e) if e.to_string().contains("UNIQUE constraint") => Err(
                ServiceError::Conflict(format!("username '{}' already exists", draft.username)),
            ),
            Err(e) => Err(storage_err("create user", e)),
        }
    }

    /// Full-field replace of an existing user, with two exceptions:
    /// an empty password leaves the stored password unchanged, and an
    /// empty role normalizes to `user`. A non-empty role is stored as
    /// supplied — this route is already admin-gated by the verb policy,
    /// so it is the promotion path.
    pub fn update_user(&self, id: i64, draft: UserDraft) -> Result<(), ServiceError> {
        let role = if draft.role.is_empty() {
            Role::User.as_str().to_string()
        } else {
            draft.role.clone()
        };

        let outcome = self
            .sql
            .with_tx(&mut |tx| {
                if !row_exists(tx, "users", id)? {
                    return Ok(TxOutcome::Rollback);
                }
                if draft.password.is_empty() {
                    tx.exec(
                        "UPDATE users SET username = ?1, email = ?2, role = ?3 WHERE id = ?4",
                        &[
                            Value::Text(draft.username.clone()),
                            Value::Text(draft.email.clone()),
                            Value::Text(role.clone()),
                            Value::Integer(id),
                        ],
                    )?;
                } else {
                    tx.exec(
                        "UPDATE users SET username = ?1, email = ?2, role = ?3, password = ?4
                         WHERE id = ?5",
                        &[
                            Value::Text(draft.username.clone()),
                            Value::Text(draft.email.clone()),
                            Value::Text(role.clone()),
                            Value::Text(draft.password.clone()),
                            Value::Integer(id),
                        ],
                    )?;
                }
                Ok(TxOutcome::Commit)
            })
            .map_err(|e| storage_err("update user", e))?;

        if outcome == TxOutcome::Rollback {
            return Err(ServiceError::NotFound(format!("user {} not found", id)));
        }
        Ok(())
    }

    /// Delete a user. Deleting an already-absent id always resolves to
    /// not-found.
    pub fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        let outcome = self
            .sql
            .with_tx(&mut |tx| {
                if !row_exists(tx, "users", id)? {
                    return Ok(TxOutcome::Rollback);
                }
                tx.exec("DELETE FROM users WHERE id = ?1", &[Value::Integer(id)])?;
                Ok(TxOutcome::Commit)
            })
            .map_err(|e| storage_err("delete user", e))?;

        if outcome == TxOutcome::Rollback {
            return Err(ServiceError::NotFound(format!("user {} not found", id)));
        }
        Ok(())
    }

    pub fn count_users(&self) -> Result<usize, ServiceError> {
        self.count_rows("users")
    }

    /// First-run seeding: insert an admin account directly. Only the
    /// bootstrap path calls this, and only on an empty users table.
    pub fn seed_admin(&self, username: &str, password: &str) -> Result<i64, ServiceError> {
        let mut id = 0;
        self.sql
            .with_tx(&mut |tx| {
                tx.exec(
                    "INSERT INTO users (username, email, password, role)
                     VALUES (?1, '', ?2, ?3)",
                    &[
                        Value::Text(username.to_string()),
                        Value::Text(password.to_string()),
                        Value::Text(Role::Admin.as_str().to_string()),
                    ],
                )?;
                id = tx.last_insert_id();
                Ok(TxOutcome::Commit)
            })
            .map_err(|e| storage_err("seed admin", e))?;
        Ok(id)
    }
}

fn user_from_row(row: &Row) -> Result<User, ServiceError> {
    Ok(User {
        id: row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Internal("missing id column".into()))?,
        username: row.get_str("username").unwrap_or_default().to_string(),
        email: row.get_str("email").unwrap_or_default().to_string(),
        password: row.get_str("password").unwrap_or_default().to_string(),
        role: row.get_str("role").unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roster_core::{ListParams, ServiceError};
    use roster_sql::{SQLStore, SqliteStore};

    use crate::model::UserDraft;
    use crate::service::RegistryService;

    fn test_service() -> Arc<RegistryService> {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        RegistryService::new(sql).unwrap()
    }

    fn draft(username: &str, password: &str, role: &str) -> UserDraft {
        UserDraft {
            username: username.into(),
            email: format!("{}@example.com", username),
            password: password.into(),
            role: role.into(),
        }
    }

    #[test]
    fn create_never_stores_an_elevated_role() {
        let svc = test_service();

        let id = svc.create_user(draft("mallory", "pw", "admin")).unwrap();
        assert_eq!(svc.get_user(id).unwrap().role, "user");

        let id = svc.create_user(draft("eve", "pw", "")).unwrap();
        assert_eq!(svc.get_user(id).unwrap().role, "user");

        let id = svc.create_user(draft("bob", "pw", "user")).unwrap();
        assert_eq!(svc.get_user(id).unwrap().role, "user");
    }

    #[test]
    fn create_requires_username() {
        let svc = test_service();
        let err = svc.create_user(draft("", "pw", "")).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn duplicate_username_is_a_conflict() {
        let svc = test_service();
        svc.create_user(draft("alice", "pw", "")).unwrap();
        let err = svc.create_user(draft("alice", "other", "")).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(svc.count_users().unwrap(), 1);
    }

    #[test]
    fn update_with_empty_password_keeps_stored_password() {
        let svc = test_service();
        let id = svc.create_user(draft("carol", "original", "")).unwrap();

        svc.update_user(id, draft("carol", "", "user")).unwrap();
        assert_eq!(svc.get_user(id).unwrap().password, "original");

        svc.update_user(id, draft("carol", "replaced", "user"))
            .unwrap();
        assert_eq!(svc.get_user(id).unwrap().password, "replaced");
    }

    #[test]
    fn update_normalizes_empty_role_and_allows_promotion() {
        let svc = test_service();
        let id = svc.create_user(draft("dave", "pw", "")).unwrap();

        svc.update_user(id, draft("dave", "", "")).unwrap();
        assert_eq!(svc.get_user(id).unwrap().role, "user");

        svc.update_user(id, draft("dave", "", "admin")).unwrap();
        assert_eq!(svc.get_user(id).unwrap().role, "admin");
    }

    #[test]
    fn update_nonexistent_is_not_found() {
        let svc = test_service();
        let err = svc.update_user(42, draft("nobody", "pw", "")).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.count_users().unwrap(), 0);
    }

    #[test]
    fn delete_nonexistent_is_not_found() {
        let svc = test_service();
        let err = svc.delete_user(42).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn seed_admin_stores_admin_role() {
        let svc = test_service();
        let id = svc.seed_admin("root", "rootpw").unwrap();
        let user = svc.get_user(id).unwrap();
        assert_eq!(user.role, "admin");
        assert_eq!(user.password, "rootpw");
    }

    #[test]
    fn find_by_username() {
        let svc = test_service();
        svc.create_user(draft("frank", "pw", "")).unwrap();

        let found = svc.find_user_by_username("frank").unwrap().unwrap();
        assert_eq!(found.username, "frank");
        assert!(svc.find_user_by_username("ghost").unwrap().is_none());
    }

    #[test]
    fn list_users_pages() {
        let svc = test_service();
        for name in ["a", "b", "c"] {
            svc.create_user(draft(name, "pw", "")).unwrap();
        }
        let result = svc
            .list_users(&ListParams {
                limit: 2,
                offset: 2,
            })
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.total, 3);
    }
}
