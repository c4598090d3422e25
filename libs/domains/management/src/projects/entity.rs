use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use super::models::{Project, ProjectChanges};

/// Sea-ORM Entity for the projects table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub started_at: Date,
    pub finished_at: Date,
    pub manager_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            started_at: model.started_at,
            finished_at: model.finished_at,
            manager_id: model.manager_id,
        }
    }
}

impl From<Project> for ActiveModel {
    fn from(project: Project) -> Self {
        ActiveModel {
            id: Set(project.id),
            title: Set(project.title),
            description: Set(project.description),
            started_at: Set(project.started_at),
            finished_at: Set(project.finished_at),
            manager_id: Set(project.manager_id),
        }
    }
}

impl From<ProjectChanges> for ActiveModel {
    fn from(changes: ProjectChanges) -> Self {
        ActiveModel {
            id: NotSet,
            title: changes.title.map_or(NotSet, Set),
            description: changes.description.map_or(NotSet, Set),
            started_at: changes.started_at.map_or(NotSet, Set),
            finished_at: changes.finished_at.map_or(NotSet, Set),
            manager_id: changes.manager_id.map_or(NotSet, Set),
        }
    }
}
