use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{ProjectError, ProjectResult};
use super::models::{Project, ProjectChanges, ProjectSearchField};
use crate::common::no_matches;

/// Repository trait for Project persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: Project) -> ProjectResult<String>;

    async fn get(&self, id: &str) -> ProjectResult<Project>;

    async fn list(&self) -> ProjectResult<Vec<Project>>;

    async fn update(&self, id: &str, changes: ProjectChanges) -> ProjectResult<()>;

    async fn delete(&self, id: &str) -> ProjectResult<()>;

    async fn search(&self, field: ProjectSearchField, value: &str)
    -> ProjectResult<Vec<Project>>;
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<String, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut projects: Vec<Project>) -> Vec<Project> {
    projects.sort_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.id.cmp(&b.id)));
    projects
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> ProjectResult<String> {
        let mut projects = self.projects.write().await;

        if projects.contains_key(&project.id) {
            return Err(ProjectError::AlreadyExists(format!("id {}", project.id)));
        }

        let id = project.id.clone();
        projects.insert(id.clone(), project);

        tracing::info!(project_id = %id, "Created project");
        Ok(id)
    }

    async fn get(&self, id: &str) -> ProjectResult<Project> {
        let projects = self.projects.read().await;
        projects
            .get(id)
            .cloned()
            .ok_or_else(|| ProjectError::not_found(id))
    }

    async fn list(&self) -> ProjectResult<Vec<Project>> {
        let projects = self.projects.read().await;
        Ok(sorted(projects.values().cloned().collect()))
    }

    async fn update(&self, id: &str, changes: ProjectChanges) -> ProjectResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut projects = self.projects.write().await;
        let project = projects
            .get_mut(id)
            .ok_or_else(|| ProjectError::not_found(id))?;
        changes.apply(project);

        tracing::info!(project_id = %id, "Updated project");
        Ok(())
    }

    async fn delete(&self, id: &str) -> ProjectResult<()> {
        let mut projects = self.projects.write().await;

        projects
            .remove(id)
            .ok_or_else(|| ProjectError::not_found(id))?;

        tracing::info!(project_id = %id, "Deleted project");
        Ok(())
    }

    async fn search(
        &self,
        field: ProjectSearchField,
        value: &str,
    ) -> ProjectResult<Vec<Project>> {
        let projects = self.projects.read().await;

        let found: Vec<Project> = projects
            .values()
            .filter(|p| p.matches(field, value))
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(ProjectError::NotFound(no_matches("projects", field, value)));
        }
        Ok(sorted(found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn project(id: &str, manager_id: &str, started: u32) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {}", id),
            description: String::new(),
            started_at: NaiveDate::from_ymd_opt(2024, 1, started).unwrap(),
            finished_at: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            manager_id: manager_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_start_date() {
        let repo = InMemoryProjectRepository::new();
        repo.create(project("p2", "m1", 20)).await.unwrap();
        repo.create(project("p1", "m1", 10)).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let repo = InMemoryProjectRepository::new();
        repo.create(project("p1", "m1", 1)).await.unwrap();

        let result = repo.create(project("p1", "m2", 2)).await;
        assert!(matches!(result, Err(ProjectError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_manager() {
        let repo = InMemoryProjectRepository::new();
        repo.create(project("p1", "m1", 1)).await.unwrap();

        let changes = ProjectChanges {
            manager_id: Some("m2".to_string()),
            ..Default::default()
        };
        repo.update("p1", changes).await.unwrap();

        let updated = repo.get("p1").await.unwrap();
        assert_eq!(updated.manager_id, "m2");
        assert_eq!(updated.title, "Project p1");
    }

    #[tokio::test]
    async fn test_search_by_manager() {
        let repo = InMemoryProjectRepository::new();
        repo.create(project("p1", "m1", 1)).await.unwrap();
        repo.create(project("p2", "m2", 2)).await.unwrap();

        let found = repo.search(ProjectSearchField::Manager, "m2").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p2");

        let result = repo.search(ProjectSearchField::Manager, "nobody").await;
        assert!(matches!(result, Err(ProjectError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_project() {
        let repo = InMemoryProjectRepository::new();
        assert!(matches!(repo.delete("p1").await, Err(ProjectError::NotFound(_))));
    }
}
