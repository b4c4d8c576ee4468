pub mod bag_template;
pub mod item_template;
pub mod local;
pub mod packing_entry;
pub mod seaorm;
pub mod trip;

pub use bag_template::BagTemplateRepository;
pub use item_template::ItemTemplateRepository;
pub use local::LocalStore;
pub use packing_entry::PackingEntryRepository;
pub use seaorm::SeaOrmStore;
pub use trip::TripRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    BagTemplate, CreateBagTemplate, CreateItemTemplate, CreateTrip, ItemTemplate, PackingEntry,
    Trip, TripBag, UpdateBagTemplate, UpdateItemTemplate, UpdateTrip,
};

/// Base repository trait for common CRUD operations
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<T>;

    /// Delete entity by ID
    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()>;

    /// List entities with pagination
    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<T>>;

    /// Count total entities
    async fn count(db: &DatabaseConnection) -> AppResult<u64>;
}

/// Storage for the reusable item and bag templates.
///
/// Stores only enforce identity and name uniqueness; cross-entity rules
/// (such as refusing to delete a template still in use) live in services.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn create_item_template(&self, input: &CreateItemTemplate) -> AppResult<ItemTemplate>;

    async fn find_item_template(&self, id: Uuid) -> AppResult<ItemTemplate>;

    /// Item templates ordered by name
    async fn list_item_templates(&self, limit: u64, offset: u64) -> AppResult<Vec<ItemTemplate>>;

    async fn count_item_templates(&self) -> AppResult<u64>;

    async fn update_item_template(
        &self,
        id: Uuid,
        input: &UpdateItemTemplate,
    ) -> AppResult<ItemTemplate>;

    async fn delete_item_template(&self, id: Uuid) -> AppResult<()>;

    async fn create_bag_template(&self, input: &CreateBagTemplate) -> AppResult<BagTemplate>;

    async fn find_bag_template(&self, id: Uuid) -> AppResult<BagTemplate>;

    /// Bag templates ordered by name
    async fn list_bag_templates(&self, limit: u64, offset: u64) -> AppResult<Vec<BagTemplate>>;

    async fn count_bag_templates(&self) -> AppResult<u64>;

    async fn update_bag_template(
        &self,
        id: Uuid,
        input: &UpdateBagTemplate,
    ) -> AppResult<BagTemplate>;

    async fn delete_bag_template(&self, id: Uuid) -> AppResult<()>;
}

/// Storage for trips, their bag associations and their packing entries
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn create_trip(&self, input: &CreateTrip) -> AppResult<Trip>;

    async fn find_trip(&self, id: Uuid) -> AppResult<Trip>;

    /// Trips ordered by start date, then name
    async fn list_trips(&self, limit: u64, offset: u64) -> AppResult<Vec<Trip>>;

    async fn count_trips(&self) -> AppResult<u64>;

    async fn update_trip(&self, id: Uuid, input: &UpdateTrip) -> AppResult<Trip>;

    /// Delete a trip together with its bag associations and packing entries
    async fn delete_trip(&self, id: Uuid) -> AppResult<()>;

    /// Associate a bag with a trip; `Conflict` if it already is
    async fn attach_bag(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<TripBag>;

    /// Remove a bag association; `NotFound` if there is none
    async fn detach_bag(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<()>;

    /// Bag associations of a trip in the order they were made
    async fn list_trip_bags(&self, trip_id: Uuid) -> AppResult<Vec<TripBag>>;

    /// Number of trips a bag template is associated with
    async fn count_trips_using_bag(&self, bag_id: Uuid) -> AppResult<u64>;

    async fn insert_entry(&self, entry: &PackingEntry) -> AppResult<PackingEntry>;

    async fn find_entry(&self, id: Uuid) -> AppResult<PackingEntry>;

    /// Look up the entry holding `item_id` in `bag_id` (or unassigned) on a trip
    async fn find_entry_by_key(
        &self,
        trip_id: Uuid,
        item_id: Uuid,
        bag_id: Option<Uuid>,
    ) -> AppResult<Option<PackingEntry>>;

    /// Entries of a trip in creation order
    async fn list_entries(&self, trip_id: Uuid) -> AppResult<Vec<PackingEntry>>;

    /// Overwrite the mutable fields of an existing entry
    async fn save_entry(&self, entry: &PackingEntry) -> AppResult<PackingEntry>;

    async fn delete_entry(&self, id: Uuid) -> AppResult<()>;

    /// Number of packing entries, across all trips, referencing an item template
    async fn count_entries_for_item(&self, item_id: Uuid) -> AppResult<u64>;
}
