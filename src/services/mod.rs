//! Business logic services

pub mod departments;
pub mod employees;
pub mod equipment;
pub mod reservations;
pub mod schedules;
pub mod templates;

use chrono::{DateTime, SubsecRound, Utc};

use crate::{
    board::BoardClock,
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub departments: departments::DepartmentsService,
    pub employees: employees::EmployeesService,
    pub equipment: equipment::EquipmentService,
    pub schedules: schedules::SchedulesService,
    pub reservations: reservations::ReservationsService,
    pub templates: templates::TemplatesService,
    repository: Repository,
    clock: BoardClock,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, clock: BoardClock) -> Self {
        let schedules = schedules::SchedulesService::new(repository.clone(), clock);
        Self {
            departments: departments::DepartmentsService::new(repository.clone()),
            employees: employees::EmployeesService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone(), clock),
            templates: templates::TemplatesService::new(repository.clone(), schedules.clone(), clock),
            schedules,
            repository,
            clock,
        }
    }

    /// Wall clock used to resolve month windows and template dates
    pub fn clock(&self) -> BoardClock {
        self.clock
    }

    /// Database readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Normalize a booking interval to whole UTC seconds and enforce `start < end`.
pub(crate) fn normalize_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = start.trunc_subsecs(0);
    let end = end.trunc_subsecs(0);
    if start >= end {
        return Err(AppError::Validation(
            "start_datetime must be before end_datetime".to_string(),
        ));
    }
    Ok((start, end))
}

/// Resolve list filters into an explicit UTC window.
///
/// `year` + `month` select a calendar month in the board clock and take
/// precedence over `start`/`end`.
pub(crate) fn resolve_window(
    clock: &BoardClock,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    year: Option<i32>,
    month: Option<u32>,
) -> AppResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    match (year, month) {
        (Some(year), Some(month)) => {
            let (from, to) = clock
                .month_window(year, month)
                .ok_or_else(|| AppError::Validation(format!("Invalid month {}-{}", year, month)))?;
            Ok((Some(from), Some(to)))
        }
        (None, None) => {
            if let (Some(s), Some(e)) = (start, end) {
                if s >= e {
                    return Err(AppError::Validation("start must be before end".to_string()));
                }
            }
            Ok((start, end))
        }
        _ => Err(AppError::BadRequest(
            "year and month must be given together".to_string(),
        )),
    }
}
