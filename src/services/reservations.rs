//! Equipment reservations service
//!
//! Unlike employee schedules, equipment cannot be double-booked: any
//! intersecting reservation for the same equipment is rejected with
//! `EQUIPMENT_CONFLICT`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use validator::Validate;

use super::{normalize_interval, resolve_window};
use crate::{
    board::{find_conflicts, BoardClock},
    error::{AppError, AppResult},
    models::reservation::{
        ConflictDetails, ConflictingReservation, CreateReservation, EquipmentReservation,
        ReservationQuery, UpdateReservation,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
    clock: BoardClock,
    // Serializes check-then-write so two requests cannot both pass the check
    write_lock: Arc<Mutex<()>>,
}

impl ReservationsService {
    pub fn new(repository: Repository, clock: BoardClock) -> Self {
        Self {
            repository,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list(&self, query: &ReservationQuery) -> AppResult<Vec<EquipmentReservation>> {
        let (start, end) =
            resolve_window(&self.clock, query.start, query.end, query.year, query.month)?;
        let resolved = ReservationQuery {
            start,
            end,
            year: None,
            month: None,
            ..query.clone()
        };
        self.repository.reservations.list(&resolved).await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<EquipmentReservation> {
        self.repository.reservations.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateReservation) -> AppResult<EquipmentReservation> {
        data.validate()?;
        let (start, end) = normalize_interval(data.start_datetime, data.end_datetime)?;
        // Verify equipment exists
        self.repository.equipment.get_by_id(data.equipment_id).await?;

        let _guard = self.write_lock.lock().await;
        self.ensure_available(data.equipment_id, start, end, None).await?;

        let data = CreateReservation {
            start_datetime: start,
            end_datetime: end,
            ..data.clone()
        };
        let reservation = self.repository.reservations.create(&data).await?;
        tracing::info!(
            "Reserved equipment {} ({} - {}) as reservation {}",
            reservation.equipment_id,
            reservation.start_datetime,
            reservation.end_datetime,
            reservation.id
        );
        Ok(reservation)
    }

    /// Partial update; the merged booking is re-checked against every other
    /// reservation of its (possibly new) equipment
    pub async fn update(&self, id: i64, data: &UpdateReservation) -> AppResult<EquipmentReservation> {
        data.validate()?;
        let _guard = self.write_lock.lock().await;
        let current = self.repository.reservations.get_by_id(id).await?;

        let (start, end) = normalize_interval(
            data.start_datetime.unwrap_or(current.start_datetime),
            data.end_datetime.unwrap_or(current.end_datetime),
        )?;
        let equipment_id = data.equipment_id.unwrap_or(current.equipment_id);
        if equipment_id != current.equipment_id {
            self.repository.equipment.get_by_id(equipment_id).await?;
        }

        self.ensure_available(equipment_id, start, end, Some(id)).await?;

        let data = UpdateReservation {
            start_datetime: Some(start),
            end_datetime: Some(end),
            ..data.clone()
        };
        let reservation = self.repository.reservations.update(id, &data).await?;
        tracing::debug!("Updated reservation {}", id);
        Ok(reservation)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.reservations.delete(id).await?;
        tracing::info!("Deleted reservation {}", id);
        Ok(())
    }

    async fn ensure_available(
        &self,
        equipment_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let candidates = self
            .repository
            .reservations
            .list_candidates(equipment_id, start, end)
            .await?;
        let conflicts = find_conflicts(equipment_id, start, end, &candidates, exclude_id);
        if conflicts.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            "Equipment {} conflict: {} existing reservation(s) overlap {} - {}",
            equipment_id,
            conflicts.len(),
            start,
            end
        );
        Err(AppError::EquipmentConflict(Box::new(ConflictDetails {
            equipment_id,
            requested_start: start,
            requested_end: end,
            conflicts: conflicts.into_iter().map(ConflictingReservation::from).collect(),
        })))
    }
}
