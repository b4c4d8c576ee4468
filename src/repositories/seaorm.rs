use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    BagTemplate, CreateBagTemplate, CreateItemTemplate, CreateTrip, ItemTemplate, PackingEntry,
    Trip, TripBag, UpdateBagTemplate, UpdateItemTemplate, UpdateTrip,
};
use crate::repositories::{
    BagTemplateRepository, ItemTemplateRepository, PackingEntryRepository, Repository,
    TemplateStore, TripRepository, TripStore,
};

/// PostgreSQL-backed store delegating to the SeaORM repositories
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TemplateStore for SeaOrmStore {
    async fn create_item_template(&self, input: &CreateItemTemplate) -> AppResult<ItemTemplate> {
        ItemTemplateRepository::create(&self.db, input).await
    }

    async fn find_item_template(&self, id: Uuid) -> AppResult<ItemTemplate> {
        ItemTemplateRepository::find_by_id(&self.db, id).await
    }

    async fn list_item_templates(&self, limit: u64, offset: u64) -> AppResult<Vec<ItemTemplate>> {
        ItemTemplateRepository::list(&self.db, limit, offset).await
    }

    async fn count_item_templates(&self) -> AppResult<u64> {
        ItemTemplateRepository::count(&self.db).await
    }

    async fn update_item_template(
        &self,
        id: Uuid,
        input: &UpdateItemTemplate,
    ) -> AppResult<ItemTemplate> {
        ItemTemplateRepository::update(&self.db, id, input).await
    }

    async fn delete_item_template(&self, id: Uuid) -> AppResult<()> {
        ItemTemplateRepository::delete(&self.db, id).await
    }

    async fn create_bag_template(&self, input: &CreateBagTemplate) -> AppResult<BagTemplate> {
        BagTemplateRepository::create(&self.db, input).await
    }

    async fn find_bag_template(&self, id: Uuid) -> AppResult<BagTemplate> {
        BagTemplateRepository::find_by_id(&self.db, id).await
    }

    async fn list_bag_templates(&self, limit: u64, offset: u64) -> AppResult<Vec<BagTemplate>> {
        BagTemplateRepository::list(&self.db, limit, offset).await
    }

    async fn count_bag_templates(&self) -> AppResult<u64> {
        BagTemplateRepository::count(&self.db).await
    }

    async fn update_bag_template(
        &self,
        id: Uuid,
        input: &UpdateBagTemplate,
    ) -> AppResult<BagTemplate> {
        BagTemplateRepository::update(&self.db, id, input).await
    }

    async fn delete_bag_template(&self, id: Uuid) -> AppResult<()> {
        BagTemplateRepository::delete(&self.db, id).await
    }
}

#[async_trait]
impl TripStore for SeaOrmStore {
    async fn create_trip(&self, input: &CreateTrip) -> AppResult<Trip> {
        TripRepository::create(&self.db, input).await
    }

    async fn find_trip(&self, id: Uuid) -> AppResult<Trip> {
        TripRepository::find_by_id(&self.db, id).await
    }

    async fn list_trips(&self, limit: u64, offset: u64) -> AppResult<Vec<Trip>> {
        TripRepository::list(&self.db, limit, offset).await
    }

    async fn count_trips(&self) -> AppResult<u64> {
        TripRepository::count(&self.db).await
    }

    async fn update_trip(&self, id: Uuid, input: &UpdateTrip) -> AppResult<Trip> {
        TripRepository::update(&self.db, id, input).await
    }

    async fn delete_trip(&self, id: Uuid) -> AppResult<()> {
        TripRepository::delete(&self.db, id).await
    }

    async fn attach_bag(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<TripBag> {
        TripRepository::attach_bag(&self.db, trip_id, bag_id).await
    }

    async fn detach_bag(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<()> {
        TripRepository::detach_bag(&self.db, trip_id, bag_id).await
    }

    async fn list_trip_bags(&self, trip_id: Uuid) -> AppResult<Vec<TripBag>> {
        TripRepository::list_bags(&self.db, trip_id).await
    }

    async fn count_trips_using_bag(&self, bag_id: Uuid) -> AppResult<u64> {
        TripRepository::count_by_bag(&self.db, bag_id).await
    }

    async fn insert_entry(&self, entry: &PackingEntry) -> AppResult<PackingEntry> {
        PackingEntryRepository::insert(&self.db, entry).await
    }

    async fn find_entry(&self, id: Uuid) -> AppResult<PackingEntry> {
        PackingEntryRepository::find_by_id(&self.db, id).await
    }

    async fn find_entry_by_key(
        &self,
        trip_id: Uuid,
        item_id: Uuid,
        bag_id: Option<Uuid>,
    ) -> AppResult<Option<PackingEntry>> {
        PackingEntryRepository::find_by_key(&self.db, trip_id, item_id, bag_id).await
    }

    async fn list_entries(&self, trip_id: Uuid) -> AppResult<Vec<PackingEntry>> {
        PackingEntryRepository::list_by_trip(&self.db, trip_id).await
    }

    async fn save_entry(&self, entry: &PackingEntry) -> AppResult<PackingEntry> {
        PackingEntryRepository::save(&self.db, entry).await
    }

    async fn delete_entry(&self, id: Uuid) -> AppResult<()> {
        PackingEntryRepository::delete(&self.db, id).await
    }

    async fn count_entries_for_item(&self, item_id: Uuid) -> AppResult<u64> {
        PackingEntryRepository::count_by_item(&self.db, item_id).await
    }
}
