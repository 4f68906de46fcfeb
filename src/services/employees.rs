//! Employees service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        employee::{CreateEmployee, Employee, EmployeeQuery, UpdateEmployee},
        ordering::{MoveDirection, OrderUpdate},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EmployeeQuery) -> AppResult<Vec<Employee>> {
        self.repository.employees.list(query).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Employee> {
        self.repository.employees.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        data.validate()?;
        // Verify department exists
        self.repository.departments.get_by_id(data.department_id).await?;
        let employee = self.repository.employees.create(data).await?;
        tracing::info!(
            "Created employee {} ({}) in department {}",
            employee.id,
            employee.employee_number,
            employee.department_id
        );
        Ok(employee)
    }

    pub async fn update(&self, id: i64, data: &UpdateEmployee) -> AppResult<Employee> {
        data.validate()?;
        if let Some(department_id) = data.department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }
        self.repository.employees.update(id, data).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.employees.delete(id).await?;
        tracing::info!("Deleted employee {} and their schedules", id);
        Ok(())
    }

    /// Move one step inside the employee's department
    pub async fn move_item(&self, id: i64, direction: MoveDirection) -> AppResult<Vec<Employee>> {
        self.repository.employees.move_item(id, direction).await?;
        self.list(&EmployeeQuery::default()).await
    }

    pub async fn update_order(&self, data: &OrderUpdate) -> AppResult<Vec<Employee>> {
        data.validate()?;
        self.repository.employees.update_order(&data.items).await?;
        self.list(&EmployeeQuery::default()).await
    }
}
