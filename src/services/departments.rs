//! Departments service

use validator::Validate;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        department::{CreateDepartment, Department, UpdateDepartment},
        ordering::{MoveDirection, OrderUpdate},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
}

impl DepartmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.repository.departments.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Department> {
        self.repository.departments.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateDepartment) -> AppResult<Department> {
        data.validate()?;
        let department = self.repository.departments.create(data).await?;
        tracing::info!("Created department {} ({})", department.id, department.name);
        Ok(department)
    }

    pub async fn update(&self, id: i64, data: &UpdateDepartment) -> AppResult<Department> {
        data.validate()?;
        self.repository.departments.update(id, data).await
    }

    /// Delete a department; refused while employees still belong to it
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.departments.get_by_id(id).await?;
        let employees = self.repository.departments.count_employees(id).await?;
        if employees > 0 {
            return Err(AppError::Conflict(
                ErrorCode::DepartmentNotEmpty,
                format!("Department {} still has {} employee(s)", id, employees),
            ));
        }
        self.repository.departments.delete(id).await?;
        tracing::info!("Deleted department {}", id);
        Ok(())
    }

    /// Move one step up or down and return the reordered list
    pub async fn move_item(&self, id: i64, direction: MoveDirection) -> AppResult<Vec<Department>> {
        self.repository.departments.move_item(id, direction).await?;
        self.list().await
    }

    pub async fn update_order(&self, data: &OrderUpdate) -> AppResult<Vec<Department>> {
        data.validate()?;
        self.repository.departments.update_order(&data.items).await?;
        self.list().await
    }
}
