use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use std::str::FromStr;

use super::entity::{self, Column, Entity};
use super::error::{UserError, UserResult};
use super::models::{Role, User, UserChanges, UserSearchField};
use super::repository::UserRepository;
use crate::common::no_matches;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(err: DbErr) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => UserError::AlreadyExists(detail),
        _ => UserError::Internal(format!("Database error: {}", err)),
    }
}

/// Translates a search into a column condition. `None` means the value can
/// never match (an unknown role), so no query is needed.
fn condition(field: UserSearchField, value: &str) -> Option<Condition> {
    let expr = match field {
        UserSearchField::Name => Column::Name.eq(value),
        UserSearchField::Email => Column::Email.eq(value),
        UserSearchField::Role => Column::Role.eq(Role::from_str(value).ok()?),
    };
    Some(Condition::all().add(expr))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<String> {
        let id = user.id.clone();
        let active_model: entity::ActiveModel = user.into();

        let inserted = Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(db_error)?;
        if inserted == 0 {
            return Err(UserError::not_found(&id));
        }

        tracing::info!(user_id = %id, "Created user");
        Ok(id)
    }

    async fn get(&self, id: &str) -> UserResult<User> {
        Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(User::from)
            .ok_or_else(|| UserError::not_found(id))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = Entity::find()
            .order_by_asc(Column::RegistrationDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: &str, changes: UserChanges) -> UserResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let result = Entity::update_many()
            .set(entity::ActiveModel::from(changes))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(UserError::not_found(id));
        }

        tracing::info!(user_id = %id, "Updated user");
        Ok(())
    }

    async fn delete(&self, id: &str) -> UserResult<()> {
        let result = Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(UserError::not_found(id));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }

    async fn search(&self, field: UserSearchField, value: &str) -> UserResult<Vec<User>> {
        let Some(condition) = condition(field, value) else {
            return Err(UserError::NotFound(no_matches("users", field, value)));
        };

        let models = Entity::find()
            .filter(condition)
            .order_by_asc(Column::RegistrationDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        if models.is_empty() {
            return Err(UserError::NotFound(no_matches("users", field, value)));
        }
        Ok(models.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: &str) -> entity::Model {
        entity::Model {
            id: id.to_string(),
            name: "Alice".to_string(),
            email: format!("{}@example.com", id),
            role: Role::Admin,
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_create_returns_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1)])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let id = repo.create(model("u1").into()).await.unwrap();
        assert_eq!(id, "u1");
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(matches!(repo.get("nope").await, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_maps_models() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("u1"), model("u2")]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].email, "u2@example.com");
    }

    #[tokio::test]
    async fn test_update_no_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let changes = UserChanges {
            name: Some("Bob".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update("u1", changes).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_update_skips_database() {
        // No exec results queued: touching the connection would fail.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PgUserRepository::new(db);

        assert!(repo.update("u1", UserChanges::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1), exec(0)])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(repo.delete("u1").await.is_ok());
        assert!(matches!(repo.delete("u1").await, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_unknown_role_skips_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PgUserRepository::new(db);

        let result = repo.search(UserSearchField::Role, "owner").await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_by_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("u1")]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let users = repo
            .search(UserSearchField::Email, "u1@example.com")
            .await
            .unwrap();
        assert_eq!(users[0].id, "u1");
    }

    #[tokio::test]
    async fn test_driver_error_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let err = repo.list().await.unwrap_err();
        assert!(err.is_internal());
    }
}
