//! Equipment service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        ordering::{MoveDirection, OrderUpdate},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let equipment = self.repository.equipment.create(data).await?;
        tracing::info!("Created equipment {} ({})", equipment.id, equipment.name);
        Ok(equipment)
    }

    pub async fn update(&self, id: i64, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.equipment.delete(id).await?;
        tracing::info!("Deleted equipment {} and its reservations", id);
        Ok(())
    }

    pub async fn move_item(&self, id: i64, direction: MoveDirection) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.move_item(id, direction).await?;
        self.list().await
    }

    pub async fn update_order(&self, data: &OrderUpdate) -> AppResult<Vec<Equipment>> {
        data.validate()?;
        self.repository.equipment.update_order(&data.items).await?;
        self.list().await
    }
}
