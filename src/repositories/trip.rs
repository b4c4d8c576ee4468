use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::packing_entry::{Column as EntryColumn, Entity as PackingEntryEntity};
use crate::entity::trip::{self, ActiveModel, Column, Entity as TripEntity};
use crate::entity::trip_bag::{
    self, ActiveModel as TripBagActiveModel, Column as TripBagColumn, Entity as TripBagEntity,
};
use crate::error::{AppError, AppResult};
use crate::models::{CreateTrip, Trip, TripBag, UpdateTrip};
use crate::repositories::Repository;

/// Trip repository for database operations
pub struct TripRepository;

#[async_trait]
impl Repository<Trip> for TripRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Trip> {
        let model = TripEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Trip"))?;

        Ok(model.into())
    }

    /// Deletes the trip, its bag associations and its packing entries in one transaction
    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let txn = db.begin().await?;

        PackingEntryEntity::delete_many()
            .filter(EntryColumn::TripId.eq(id))
            .exec(&txn)
            .await?;
        TripBagEntity::delete_many()
            .filter(TripBagColumn::TripId.eq(id))
            .exec(&txn)
            .await?;
        let result = TripEntity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::not_found("Trip"));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<Trip>> {
        let models = TripEntity::find()
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Name)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = TripEntity::find().count(db).await?;
        Ok(count)
    }
}

impl TripRepository {
    /// Create a new trip
    pub async fn create(db: &DatabaseConnection, input: &CreateTrip) -> AppResult<Trip> {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Update a trip
    pub async fn update(db: &DatabaseConnection, id: Uuid, input: &UpdateTrip) -> AppResult<Trip> {
        let model = TripEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Trip"))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(end_date);
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Associate a bag template with a trip
    pub async fn attach_bag(
        db: &DatabaseConnection,
        trip_id: Uuid,
        bag_id: Uuid,
    ) -> AppResult<TripBag> {
        let existing = TripBagEntity::find_by_id((trip_id, bag_id)).one(db).await?;
        if existing.is_some() {
            return Err(AppError::conflict("Bag is already on this trip"));
        }

        let model = TripBagActiveModel {
            trip_id: Set(trip_id),
            bag_id: Set(bag_id),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Remove a bag association from a trip
    pub async fn detach_bag(db: &DatabaseConnection, trip_id: Uuid, bag_id: Uuid) -> AppResult<()> {
        let result = TripBagEntity::delete_by_id((trip_id, bag_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Trip bag"));
        }

        Ok(())
    }

    /// List bag associations of a trip, oldest first
    pub async fn list_bags(db: &DatabaseConnection, trip_id: Uuid) -> AppResult<Vec<TripBag>> {
        let models = TripBagEntity::find()
            .filter(TripBagColumn::TripId.eq(trip_id))
            .order_by_asc(TripBagColumn::CreatedAt)
            .order_by_asc(TripBagColumn::BagId)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Count trips a bag template is associated with
    pub async fn count_by_bag(db: &DatabaseConnection, bag_id: Uuid) -> AppResult<u64> {
        let count = TripBagEntity::find()
            .filter(TripBagColumn::BagId.eq(bag_id))
            .count(db)
            .await?;

        Ok(count)
    }
}

// Conversion from SeaORM models to our domain models
impl From<trip::Model> for Trip {
    fn from(m: trip::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            start_date: m.start_date,
            end_date: m.end_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<trip_bag::Model> for TripBag {
    fn from(m: trip_bag::Model) -> Self {
        Self {
            trip_id: m.trip_id,
            bag_id: m.bag_id,
            created_at: m.created_at,
        }
    }
}
