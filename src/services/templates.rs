//! Schedule templates service

use chrono::{Duration, NaiveDate, NaiveTime};
use validator::Validate;

use super::schedules::SchedulesService;
use crate::{
    board::BoardClock,
    error::{AppError, AppResult},
    models::{
        schedule::{CreateSchedule, Schedule},
        template::{ApplyTemplate, CreateTemplate, ScheduleTemplate, UpdateTemplate},
        DEFAULT_COLOR,
    },
    repository::{templates::TemplateRecord, Repository},
};

#[derive(Clone)]
pub struct TemplatesService {
    repository: Repository,
    schedules: SchedulesService,
    clock: BoardClock,
}

impl TemplatesService {
    pub fn new(repository: Repository, schedules: SchedulesService, clock: BoardClock) -> Self {
        Self {
            repository,
            schedules,
            clock,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<ScheduleTemplate>> {
        self.repository.templates.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<ScheduleTemplate> {
        self.repository.templates.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateTemplate) -> AppResult<ScheduleTemplate> {
        data.validate()?;
        let record = TemplateRecord {
            name: data.name.trim().to_string(),
            title: data.title.trim().to_string(),
            color: data.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            start_time: parse_time(&data.start_time, "start_time")?,
            end_time: parse_time(&data.end_time, "end_time")?,
        };
        self.repository.templates.create(&record).await
    }

    pub async fn update(&self, id: i64, data: &UpdateTemplate) -> AppResult<ScheduleTemplate> {
        data.validate()?;
        let current = self.repository.templates.get_by_id(id).await?;

        let record = TemplateRecord {
            name: data.name.as_deref().map(str::trim).unwrap_or(&current.name).to_string(),
            title: data.title.as_deref().map(str::trim).unwrap_or(&current.title).to_string(),
            color: data.color.clone().unwrap_or(current.color),
            start_time: match data.start_time {
                Some(ref s) => parse_time(s, "start_time")?,
                None => current.start_time,
            },
            end_time: match data.end_time {
                Some(ref s) => parse_time(s, "end_time")?,
                None => current.end_time,
            },
        };
        self.repository.templates.update(id, &record).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.templates.delete(id).await
    }

    /// Create a schedule for one employee on one local day from a template
    pub async fn apply(&self, id: i64, data: &ApplyTemplate) -> AppResult<Schedule> {
        let template = self.repository.templates.get_by_id(id).await?;
        let date = NaiveDate::parse_from_str(&data.date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date (use YYYY-MM-DD)".to_string()))?;

        let start = date.and_time(template.start_time);
        let mut end = date.and_time(template.end_time);
        if end <= start {
            // Overnight shift
            end += Duration::days(1);
        }

        let schedule = self
            .schedules
            .create(&CreateSchedule {
                employee_id: data.employee_id,
                title: template.title.clone(),
                start_datetime: self.clock.to_utc(start),
                end_datetime: self.clock.to_utc(end),
                color: Some(template.color.clone()),
            })
            .await?;
        tracing::info!(
            "Applied template {} to employee {} on {}",
            template.id,
            data.employee_id,
            date
        );
        Ok(schedule)
    }
}

fn parse_time(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM)", field)))
}
