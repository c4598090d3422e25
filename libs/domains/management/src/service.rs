use std::fmt::Display;
use std::sync::Arc;
use validator::Validate;

use crate::common::{SearchRequest, generate_id, search_field};
use crate::projects::{
    CreateProject, InMemoryProjectRepository, ProjectError, ProjectRepository, ProjectResponse,
    ProjectResult, ProjectSearchField, UpdateProject,
};
use crate::tasks::{
    CreateTask, InMemoryTaskRepository, TaskError, TaskRepository, TaskResponse, TaskResult,
    TaskSearchField, UpdateTask,
};
use crate::users::{
    CreateUser, InMemoryUserRepository, UpdateUser, UserError, UserRepository, UserResponse,
    UserResult, UserSearchField,
};

trait Failure: Display {
    fn is_internal(&self) -> bool;
}

impl Failure for UserError {
    fn is_internal(&self) -> bool {
        UserError::is_internal(self)
    }
}

impl Failure for ProjectError {
    fn is_internal(&self) -> bool {
        ProjectError::is_internal(self)
    }
}

impl Failure for TaskError {
    fn is_internal(&self) -> bool {
        TaskError::is_internal(self)
    }
}

/// Logs a failed operation once and hands the result back untouched.
fn logged<T, E: Failure>(operation: &str, result: Result<T, E>) -> Result<T, E> {
    if let Err(err) = &result {
        if err.is_internal() {
            tracing::error!(operation, error = %err, "Operation failed");
        } else {
            tracing::warn!(operation, error = %err, "Operation rejected");
        }
    }
    result
}

/// Service layer for users, projects and tasks
#[derive(Clone)]
pub struct ManagementService {
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl ManagementService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        projects: Arc<dyn ProjectRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            users,
            projects,
            tasks,
        }
    }

    /// Service backed by the in-memory repositories
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryProjectRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
        )
    }

    // Users

    pub async fn create_user(&self, input: CreateUser) -> UserResult<String> {
        let result: UserResult<String> = async {
            input.validate()?;
            let user = input.into_user(generate_id())?;
            self.users.create(user).await
        }
        .await;
        logged("create_user", result)
    }

    pub async fn get_user(&self, id: &str) -> UserResult<UserResponse> {
        let result = self.users.get(id).await.map(UserResponse::from);
        logged("get_user", result)
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let result = self
            .users
            .list()
            .await
            .map(|users| users.into_iter().map(UserResponse::from).collect());
        logged("list_users", result)
    }

    pub async fn update_user(&self, id: &str, input: UpdateUser) -> UserResult<()> {
        let result: UserResult<()> = async {
            input.validate()?;
            let changes = input.into_changes()?;
            self.users.update(id, changes).await
        }
        .await;
        logged("update_user", result)
    }

    pub async fn delete_user(&self, id: &str) -> UserResult<()> {
        let result = self.users.delete(id).await;
        logged("delete_user", result)
    }

    pub async fn search_users(&self, request: SearchRequest) -> UserResult<Vec<UserResponse>> {
        let result: UserResult<Vec<UserResponse>> = async {
            let field: UserSearchField = search_field(&request).map_err(UserError::Search)?;
            let users = self.users.search(field, &request.value).await?;
            Ok(users.into_iter().map(UserResponse::from).collect())
        }
        .await;
        logged("search_users", result)
    }

    // Projects

    pub async fn create_project(&self, input: CreateProject) -> ProjectResult<String> {
        let result: ProjectResult<String> = async {
            input.validate()?;
            let project = input.into_project(generate_id())?;
            self.projects.create(project).await
        }
        .await;
        logged("create_project", result)
    }

    pub async fn get_project(&self, id: &str) -> ProjectResult<ProjectResponse> {
        let result = self.projects.get(id).await.map(ProjectResponse::from);
        logged("get_project", result)
    }

    pub async fn list_projects(&self) -> ProjectResult<Vec<ProjectResponse>> {
        let result = self
            .projects
            .list()
            .await
            .map(|projects| projects.into_iter().map(ProjectResponse::from).collect());
        logged("list_projects", result)
    }

    pub async fn update_project(&self, id: &str, input: UpdateProject) -> ProjectResult<()> {
        let result: ProjectResult<()> = async {
            input.validate()?;
            let changes = input.into_changes()?;
            self.projects.update(id, changes).await
        }
        .await;
        logged("update_project", result)
    }

    pub async fn delete_project(&self, id: &str) -> ProjectResult<()> {
        let result = self.projects.delete(id).await;
        logged("delete_project", result)
    }

    pub async fn search_projects(
        &self,
        request: SearchRequest,
    ) -> ProjectResult<Vec<ProjectResponse>> {
        let result: ProjectResult<Vec<ProjectResponse>> = async {
            let field: ProjectSearchField =
                search_field(&request).map_err(ProjectError::Search)?;
            let projects = self.projects.search(field, &request.value).await?;
            Ok(projects.into_iter().map(ProjectResponse::from).collect())
        }
        .await;
        logged("search_projects", result)
    }

    // Tasks

    pub async fn create_task(&self, input: CreateTask) -> TaskResult<String> {
        let result: TaskResult<String> = async {
            input.validate()?;
            let task = input.into_task(generate_id())?;
            self.tasks.create(task).await
        }
        .await;
        logged("create_task", result)
    }

    pub async fn get_task(&self, id: &str) -> TaskResult<TaskResponse> {
        let result = self.tasks.get(id).await.map(TaskResponse::from);
        logged("get_task", result)
    }

    pub async fn list_tasks(&self) -> TaskResult<Vec<TaskResponse>> {
        let result = self
            .tasks
            .list()
            .await
            .map(|tasks| tasks.into_iter().map(TaskResponse::from).collect());
        logged("list_tasks", result)
    }

    pub async fn update_task(&self, id: &str, input: UpdateTask) -> TaskResult<()> {
        let result: TaskResult<()> = async {
            input.validate()?;
            let changes = input.into_changes()?;
            self.tasks.update(id, changes).await
        }
        .await;
        logged("update_task", result)
    }

    pub async fn delete_task(&self, id: &str) -> TaskResult<()> {
        let result = self.tasks.delete(id).await;
        logged("delete_task", result)
    }

    pub async fn search_tasks(&self, request: SearchRequest) -> TaskResult<Vec<TaskResponse>> {
        let result: TaskResult<Vec<TaskResponse>> = async {
            let field: TaskSearchField = search_field(&request).map_err(TaskError::Search)?;
            self.find_tasks(field, &request.value).await
        }
        .await;
        logged("search_tasks", result)
    }

    /// Tasks authored by a user
    pub async fn list_user_tasks(&self, user_id: &str) -> TaskResult<Vec<TaskResponse>> {
        let result = self.find_tasks(TaskSearchField::Assignee, user_id).await;
        logged("list_user_tasks", result)
    }

    /// Tasks belonging to a project
    pub async fn list_project_tasks(&self, project_id: &str) -> TaskResult<Vec<TaskResponse>> {
        let result = self.find_tasks(TaskSearchField::ProjectId, project_id).await;
        logged("list_project_tasks", result)
    }

    async fn find_tasks(&self, field: TaskSearchField, value: &str) -> TaskResult<Vec<TaskResponse>> {
        let tasks = self.tasks.search(field, value).await?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }
}
