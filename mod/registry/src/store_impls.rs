//! Trait implementations wiring the registry into other modules.

use roster_core::{Account, AccountDirectory, Role, ServiceError};

use crate::service::RegistryService;

/// The user table doubles as the account directory consumed by the
/// token gateway. Stored role strings outside the known set degrade to
/// `user` rather than failing the login.
impl AccountDirectory for RegistryService {
    fn find_account(&self, username: &str) -> Result<Option<Account>, ServiceError> {
        let user = self.find_user_by_username(username)?;
        Ok(user.map(|u| Account {
            role: Role::parse(&u.role).unwrap_or(Role::User),
            username: u.username,
            password: u.password,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roster_core::{AccountDirectory, Role};
    use roster_sql::{SQLStore, SqliteStore};

    use crate::model::UserDraft;
    use crate::service::RegistryService;

    #[test]
    fn user_table_backs_the_directory() {
        let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let svc = RegistryService::new(sql).unwrap();

        svc.seed_admin("admin1", "secret").unwrap();
        svc.create_user(UserDraft {
            username: "casual".into(),
            email: String::new(),
            password: "pw".into(),
            role: String::new(),
        })
        .unwrap();

        let admin = svc.find_account("admin1").unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.password, "secret");

        let casual = svc.find_account("casual").unwrap().unwrap();
        assert_eq!(casual.role, Role::User);

        assert!(svc.find_account("ghost").unwrap().is_none());
    }
}
