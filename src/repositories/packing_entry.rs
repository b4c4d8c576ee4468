use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::packing_entry::{self, ActiveModel, Column, Entity as PackingEntryEntity};
use crate::error::{AppError, AppResult};
use crate::models::PackingEntry;
use crate::repositories::Repository;

/// Packing entry repository for database operations
pub struct PackingEntryRepository;

#[async_trait]
impl Repository<PackingEntry> for PackingEntryRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<PackingEntry> {
        let model = PackingEntryEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Packing entry"))?;

        model.try_into()
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = PackingEntryEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Packing entry"));
        }

        Ok(())
    }

    async fn list(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<PackingEntry>> {
        let models = PackingEntryEntity::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        models.into_iter().map(PackingEntry::try_from).collect()
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = PackingEntryEntity::find().count(db).await?;
        Ok(count)
    }
}

impl PackingEntryRepository {
    /// Insert a fully built entry
    pub async fn insert(db: &DatabaseConnection, entry: &PackingEntry) -> AppResult<PackingEntry> {
        let model = ActiveModel {
            id: Set(entry.id),
            trip_id: Set(entry.trip_id),
            item_id: Set(entry.item_id),
            bag_id: Set(entry.bag_id),
            quantity: Set(entry.quantity),
            status: Set(entry.status.as_str().to_string()),
            created_at: Set(entry.created_at),
            updated_at: Set(entry.updated_at),
        };

        let result = model.insert(db).await?;
        result.try_into()
    }

    /// Find the entry for an item in a given bag (or unassigned) of a trip
    pub async fn find_by_key(
        db: &DatabaseConnection,
        trip_id: Uuid,
        item_id: Uuid,
        bag_id: Option<Uuid>,
    ) -> AppResult<Option<PackingEntry>> {
        let bag_filter = match bag_id {
            Some(bag_id) => Column::BagId.eq(bag_id),
            None => Column::BagId.is_null(),
        };

        let model = PackingEntryEntity::find()
            .filter(Column::TripId.eq(trip_id))
            .filter(Column::ItemId.eq(item_id))
            .filter(bag_filter)
            .one(db)
            .await?;

        model.map(PackingEntry::try_from).transpose()
    }

    /// List entries of a trip in creation order
    pub async fn list_by_trip(
        db: &DatabaseConnection,
        trip_id: Uuid,
    ) -> AppResult<Vec<PackingEntry>> {
        let models = PackingEntryEntity::find()
            .filter(Column::TripId.eq(trip_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        models.into_iter().map(PackingEntry::try_from).collect()
    }

    /// Persist bag, quantity and status of an existing entry
    pub async fn save(db: &DatabaseConnection, entry: &PackingEntry) -> AppResult<PackingEntry> {
        let model = PackingEntryEntity::find_by_id(entry.id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Packing entry"))?;

        let mut active: ActiveModel = model.into();
        active.bag_id = Set(entry.bag_id);
        active.quantity = Set(entry.quantity);
        active.status = Set(entry.status.as_str().to_string());
        active.updated_at = Set(entry.updated_at);

        let result = active.update(db).await?;
        result.try_into()
    }

    /// Count entries referencing an item template
    pub async fn count_by_item(db: &DatabaseConnection, item_id: Uuid) -> AppResult<u64> {
        let count = PackingEntryEntity::find()
            .filter(Column::ItemId.eq(item_id))
            .count(db)
            .await?;

        Ok(count)
    }
}

// Conversion from SeaORM model to our domain model
impl TryFrom<packing_entry::Model> for PackingEntry {
    type Error = AppError;

    fn try_from(m: packing_entry::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            trip_id: m.trip_id,
            item_id: m.item_id,
            bag_id: m.bag_id,
            quantity: m.quantity,
            status: m.status.parse().map_err(AppError::Database)?,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}
