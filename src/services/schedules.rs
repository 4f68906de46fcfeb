//! Schedules service (employee time blocks)
//!
//! Overlapping schedules for the same employee are allowed; the board only
//! highlights them.

use validator::Validate;

use super::{normalize_interval, resolve_window};
use crate::{
    board::BoardClock,
    error::AppResult,
    models::schedule::{CreateSchedule, Schedule, ScheduleQuery, UpdateSchedule},
    repository::Repository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
    clock: BoardClock,
}

impl SchedulesService {
    pub fn new(repository: Repository, clock: BoardClock) -> Self {
        Self { repository, clock }
    }

    pub async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<Schedule>> {
        let (start, end) =
            resolve_window(&self.clock, query.start, query.end, query.year, query.month)?;
        let resolved = ScheduleQuery {
            start,
            end,
            year: None,
            month: None,
            ..query.clone()
        };
        self.repository.schedules.list(&resolved).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Schedule> {
        self.repository.schedules.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateSchedule) -> AppResult<Schedule> {
        data.validate()?;
        let (start, end) = normalize_interval(data.start_datetime, data.end_datetime)?;
        // Verify employee exists
        self.repository.employees.get_by_id(data.employee_id).await?;

        let data = CreateSchedule {
            start_datetime: start,
            end_datetime: end,
            ..data.clone()
        };
        let schedule = self.repository.schedules.create(&data).await?;
        tracing::info!(
            "Created schedule {} for employee {} ({} - {})",
            schedule.id,
            schedule.employee_id,
            schedule.start_datetime,
            schedule.end_datetime
        );
        Ok(schedule)
    }

    /// Partial update; the merged interval must still satisfy `start < end`
    pub async fn update(&self, id: i64, data: &UpdateSchedule) -> AppResult<Schedule> {
        data.validate()?;
        let current = self.repository.schedules.get_by_id(id).await?;

        let (start, end) = normalize_interval(
            data.start_datetime.unwrap_or(current.start_datetime),
            data.end_datetime.unwrap_or(current.end_datetime),
        )?;
        if let Some(employee_id) = data.employee_id {
            self.repository.employees.get_by_id(employee_id).await?;
        }

        let data = UpdateSchedule {
            start_datetime: Some(start),
            end_datetime: Some(end),
            ..data.clone()
        };
        let schedule = self.repository.schedules.update(id, &data).await?;
        tracing::debug!("Updated schedule {}", id);
        Ok(schedule)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.schedules.delete(id).await?;
        tracing::info!("Deleted schedule {}", id);
        Ok(())
    }
}
