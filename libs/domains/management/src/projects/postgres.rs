use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

use super::entity::{self, Column, Entity};
use super::error::{ProjectError, ProjectResult};
use super::models::{Project, ProjectChanges, ProjectSearchField};
use super::repository::ProjectRepository;
use crate::common::no_matches;

/// PostgreSQL implementation of ProjectRepository
#[derive(Clone)]
pub struct PgProjectRepository {
    db: DatabaseConnection,
}

impl PgProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(err: DbErr) -> ProjectError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => ProjectError::AlreadyExists(detail),
        _ => ProjectError::Internal(format!("Database error: {}", err)),
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn create(&self, project: Project) -> ProjectResult<String> {
        let id = project.id.clone();

        let inserted = Entity::insert(entity::ActiveModel::from(project))
            .exec_without_returning(&self.db)
            .await
            .map_err(db_error)?;
        if inserted == 0 {
            return Err(ProjectError::not_found(&id));
        }

        tracing::info!(project_id = %id, "Created project");
        Ok(id)
    }

    async fn get(&self, id: &str) -> ProjectResult<Project> {
        let model = Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        model
            .map(Project::from)
            .ok_or_else(|| ProjectError::not_found(id))
    }

    async fn list(&self) -> ProjectResult<Vec<Project>> {
        let models = Entity::find()
            .order_by_asc(Column::StartedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Project::from).collect())
    }

    async fn update(&self, id: &str, changes: ProjectChanges) -> ProjectResult<()> {
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
            return Err(ProjectError::not_found(id));
        }

        tracing::info!(project_id = %id, "Updated project");
        Ok(())
    }

    async fn delete(&self, id: &str) -> ProjectResult<()> {
        let result = Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(ProjectError::not_found(id));
        }

        tracing::info!(project_id = %id, "Deleted project");
        Ok(())
    }

    async fn search(
        &self,
        field: ProjectSearchField,
        value: &str,
    ) -> ProjectResult<Vec<Project>> {
        let column = match field {
            ProjectSearchField::Title => Column::Title,
            ProjectSearchField::Manager => Column::ManagerId,
        };

        let models = Entity::find()
            .filter(column.eq(value))
            .order_by_asc(Column::StartedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        if models.is_empty() {
            return Err(ProjectError::NotFound(no_matches("projects", field, value)));
        }
        Ok(models.into_iter().map(Project::from).collect())
    }
}
