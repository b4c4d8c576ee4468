use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    BagTemplate, CreateBagTemplate, CreateItemTemplate, CreateTrip, ItemTemplate, PackingEntry,
    Trip, TripBag, UpdateBagTemplate, UpdateItemTemplate, UpdateTrip,
};
use crate::repositories::{TemplateStore, TripStore};

/// In-process store, optionally mirrored to a JSON snapshot file.
///
/// Without a path the store is purely in-memory, which is what tests use.
/// With a path every successful mutation rewrites the snapshot.
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<Mutex<Snapshot>>,
    path: Option<Arc<PathBuf>>,
}

/// Everything the store holds; also the on-disk format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    trips: Vec<Trip>,
    #[serde(default)]
    item_templates: Vec<ItemTemplate>,
    #[serde(default)]
    bag_templates: Vec<BagTemplate>,
    #[serde(default)]
    trip_bags: Vec<TripBag>,
    #[serde(default)]
    packing_entries: Vec<PackingEntry>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Snapshot::default())),
            path: None,
        }
    }

    /// Open a store backed by `path`, loading the snapshot if the file exists
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            path = %path.display(),
            trips = snapshot.trips.len(),
            entries = snapshot.packing_entries.len(),
            "Loaded local snapshot"
        );

        Ok(Self {
            inner: Arc::new(Mutex::new(snapshot)),
            path: Some(Arc::new(path)),
        })
    }

    /// Write the snapshot next to the target and rename it into place
    async fn persist(&self, snapshot: &Snapshot) -> AppResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = tmp_path(path);
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;

        Ok(())
    }

    /// Apply `change` to a copy of the snapshot. The copy replaces the live
    /// snapshot only once it has been persisted, so a failed write leaves
    /// the store as it was.
    async fn mutate<T, F>(&self, change: F) -> AppResult<T>
    where
        F: FnOnce(&mut Snapshot) -> AppResult<T> + Send,
        T: Send,
    {
        let mut inner = self.inner.lock().await;
        let mut candidate = inner.clone();
        let value = change(&mut candidate)?;

        self.persist(&candidate).await?;
        *inner = candidate;
        Ok(value)
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn page<T: Clone>(items: Vec<T>, limit: u64, offset: u64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}

impl Snapshot {
    fn ensure_item_name_free(&self, name: &str, except: Option<Uuid>) -> AppResult<()> {
        if self
            .item_templates
            .iter()
            .any(|t| t.name == name && Some(t.id) != except)
        {
            return Err(AppError::conflict(format!(
                "An item template named '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn ensure_bag_name_free(&self, name: &str, except: Option<Uuid>) -> AppResult<()> {
        if self
            .bag_templates
            .iter()
            .any(|t| t.name == name && Some(t.id) != except)
        {
            return Err(AppError::conflict(format!(
                "A bag template named '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn ensure_trip_name_free(&self, name: &str, except: Option<Uuid>) -> AppResult<()> {
        if self
            .trips
            .iter()
            .any(|t| t.name == name && Some(t.id) != except)
        {
            return Err(AppError::conflict(format!(
                "A trip named '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn ensure_entry_key_free(&self, entry: &PackingEntry) -> AppResult<()> {
        let taken = self.packing_entries.iter().any(|e| {
            e.id != entry.id
                && e.trip_id == entry.trip_id
                && e.item_id == entry.item_id
                && e.bag_id == entry.bag_id
        });

        if taken {
            return Err(AppError::conflict(
                "This item already has an entry in that bag",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TemplateStore for LocalStore {
    async fn create_item_template(&self, input: &CreateItemTemplate) -> AppResult<ItemTemplate> {
        self.mutate(|snapshot| {
            snapshot.ensure_item_name_free(&input.name, None)?;

            let now = OffsetDateTime::now_utc();
            let template = ItemTemplate {
                id: Uuid::new_v4(),
                name: input.name.clone(),
                category: input.category,
                created_at: now,
                updated_at: now,
            };
            snapshot.item_templates.push(template.clone());
            Ok(template)
        })
        .await
    }

    async fn find_item_template(&self, id: Uuid) -> AppResult<ItemTemplate> {
        let inner = self.inner.lock().await;
        inner
            .item_templates
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Item template"))
    }

    async fn list_item_templates(&self, limit: u64, offset: u64) -> AppResult<Vec<ItemTemplate>> {
        let inner = self.inner.lock().await;
        let mut templates = inner.item_templates.clone();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(templates, limit, offset))
    }

    async fn count_item_templates(&self) -> AppResult<u64> {
        let inner = self.inner.lock().await;
        Ok(inner.item_templates.len() as u64)
    }

    async fn update_item_template(
        &self,
        id: Uuid,
        input: &UpdateItemTemplate,
    ) -> AppResult<ItemTemplate> {
        self.mutate(|snapshot| {
            if let Some(name) = &input.name {
                snapshot.ensure_item_name_free(name, Some(id))?;
            }

            let template = snapshot
                .item_templates
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| AppError::not_found("Item template"))?;

            if let Some(name) = &input.name {
                template.name = name.clone();
            }
            if let Some(category) = input.category {
                template.category = category;
            }
            template.updated_at = OffsetDateTime::now_utc();
            Ok(template.clone())
        })
        .await
    }

    async fn delete_item_template(&self, id: Uuid) -> AppResult<()> {
        self.mutate(|snapshot| {
            let before = snapshot.item_templates.len();
            snapshot.item_templates.retain(|t| t.id != id);

            if snapshot.item_templates.len() == before {
                return Err(AppError::not_found("Item template"));
            }
            Ok(())
        })
        .await
    }

    async fn create_bag_template(&self, input: &CreateBagTemplate) -> AppResult<BagTemplate> {
        self.mutate(|snapshot| {
            snapshot.ensure_bag_name_free(&input.name, None)?;

            let now = OffsetDateTime::now_utc();
            let template = BagTemplate {
                id: Uuid::new_v4(),
                name: input.name.clone(),
                bag_type: input.bag_type,
                created_at: now,
                updated_at: now,
            };
            snapshot.bag_templates.push(template.clone());
            Ok(template)
        })
        .await
    }

    async fn find_bag_template(&self, id: Uuid) -> AppResult<BagTemplate> {
        let inner = self.inner.lock().await;
        inner
            .bag_templates
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Bag template"))
    }

    async fn list_bag_templates(&self, limit: u64, offset: u64) -> AppResult<Vec<BagTemplate>> {
        let inner = self.inner.lock().await;
        let mut templates = inner.bag_templates.clone();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(templates, limit, offset))
    }

    async fn count_bag_templates(&self) -> AppResult<u64> {
        let inner = self.inner.lock().await;
        Ok(inner.bag_templates.len() as u64)
    }

    async fn update_bag_template(
        &self,
        id: Uuid,
        input: &UpdateBagTemplate,
    ) -> AppResult<BagTemplate> {
        self.mutate(|snapshot| {
            if let Some(name) = &input.name {
                snapshot.ensure_bag_name_free(name, Some(id))?;
            }

            let template = snapshot
                .bag_templates
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| AppError::not_found("Bag template"))?;

            if let Some(name) = &input.name {
                template.name = name.clone();
            }
            if let Some(bag_type) = input.bag_type {
                template.bag_type = bag_type;
            }
            template.updated_at = OffsetDateTime::now_utc();
            Ok(template.clone())
        })
        .await
    }

    async fn delete_bag_template(&self, id: Uuid) -> AppResult<()> {
        self.mutate(|snapshot| {
            let before = snapshot.bag_templates.len();
            snapshot.bag_templates.retain(|t| t.id != id);

            if snapshot.bag_templates.len() == before {
                return Err(AppError::not_found("Bag template"));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl TripStore for LocalStore {
    async fn create_trip(&self, input: &CreateTrip) -> AppResult<Trip> {
        self.mutate(|snapshot| {
            snapshot.ensure_trip_name_free(&input.name, None)?;

            let now = OffsetDateTime::now_utc();
            let trip = Trip {
                id: Uuid::new_v4(),
                name: input.name.clone(),
                start_date: input.start_date,
                end_date: input.end_date,
                created_at: now,
                updated_at: now,
            };
            snapshot.trips.push(trip.clone());
            Ok(trip)
        })
        .await
    }

    async fn find_trip(&self, id: Uuid) -> AppResult<Trip> {
        let inner = self.inner.lock().await;
        inner
            .trips
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Trip"))
    }

    async fn list_trips(&self, limit: u64, offset: u64) -> AppResult<Vec<Trip>> {
        let inner = self.inner.lock().await;
        let mut trips = inner.trips.clone();
        trips.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(page(trips, limit, offset))
    }

    async fn count_trips(&self) -> AppResult<u64> {
        let inner = self.inner.lock().await;
        Ok(inner.trips.len() as u64)
    }

    async fn update_trip(&self, id: Uuid, input: &UpdateTrip) -> AppResult<Trip> {
        self.mutate(|snapshot| {
            if let Some(name) = &input.name {
                snapshot.ensure_trip_name_free(name, Some(id))?;
            }

            let trip = snapshot
                .trips
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| AppError::not_found("Trip"))?;

            if let Some(name) = &input.name {
                trip.name = name.clone();
            }
            if let Some(start_date) = input.start_date {
                trip.start_date = start_date;
            }
            if let Some(end_date) = input.end_date {
                trip.end_date = end_date;
            }
            trip.updated_at = OffsetDateTime::now_utc();
            Ok(trip.clone())
        })
        .await
    }

    async fn delete_trip(&self, id: Uuid) -> AppResult<()> {
        self.mutate(|snapshot| {
            if !snapshot.trips.iter().any(|t| t.id == id) {
                return Err(AppError::not_found("Trip"));
            }

            snapshot.packing_entries.retain(|e| e.trip_id != id);
            snapshot.trip_bags.retain(|tb| tb.trip_id != id);
            snapshot.trips.retain(|t| t.id != id);
            Ok(())
        })
        .await
    }

    async fn attach_bag(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<TripBag> {
        self.mutate(|snapshot| {
            if snapshot
                .trip_bags
                .iter()
                .any(|tb| tb.trip_id == trip_id && tb.bag_id == bag_id)
            {
                return Err(AppError::conflict("Bag is already on this trip"));
            }

            let trip_bag = TripBag {
                trip_id,
                bag_id,
                created_at: OffsetDateTime::now_utc(),
            };
            snapshot.trip_bags.push(trip_bag.clone());
            Ok(trip_bag)
        })
        .await
    }

    async fn detach_bag(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<()> {
        self.mutate(|snapshot| {
            let before = snapshot.trip_bags.len();
            snapshot
                .trip_bags
                .retain(|tb| !(tb.trip_id == trip_id && tb.bag_id == bag_id));

            if snapshot.trip_bags.len() == before {
                return Err(AppError::not_found("Trip bag"));
            }
            Ok(())
        })
        .await
    }

    async fn list_trip_bags(&self, trip_id: Uuid) -> AppResult<Vec<TripBag>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .trip_bags
            .iter()
            .filter(|tb| tb.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn count_trips_using_bag(&self, bag_id: Uuid) -> AppResult<u64> {
        let inner = self.inner.lock().await;
        Ok(inner.trip_bags.iter().filter(|tb| tb.bag_id == bag_id).count() as u64)
    }

    async fn insert_entry(&self, entry: &PackingEntry) -> AppResult<PackingEntry> {
        self.mutate(|snapshot| {
            snapshot.ensure_entry_key_free(entry)?;
            snapshot.packing_entries.push(entry.clone());
            Ok(entry.clone())
        })
        .await
    }

    async fn find_entry(&self, id: Uuid) -> AppResult<PackingEntry> {
        let inner = self.inner.lock().await;
        inner
            .packing_entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Packing entry"))
    }

    async fn find_entry_by_key(
        &self,
        trip_id: Uuid,
        item_id: Uuid,
        bag_id: Option<Uuid>,
    ) -> AppResult<Option<PackingEntry>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .packing_entries
            .iter()
            .find(|e| e.trip_id == trip_id && e.item_id == item_id && e.bag_id == bag_id)
            .cloned())
    }

    async fn list_entries(&self, trip_id: Uuid) -> AppResult<Vec<PackingEntry>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .packing_entries
            .iter()
            .filter(|e| e.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn save_entry(&self, entry: &PackingEntry) -> AppResult<PackingEntry> {
        self.mutate(|snapshot| {
            snapshot.ensure_entry_key_free(entry)?;

            let stored = snapshot
                .packing_entries
                .iter_mut()
                .find(|e| e.id == entry.id)
                .ok_or_else(|| AppError::not_found("Packing entry"))?;

            stored.bag_id = entry.bag_id;
            stored.quantity = entry.quantity;
            stored.status = entry.status;
            stored.updated_at = entry.updated_at;
            Ok(stored.clone())
        })
        .await
    }

    async fn delete_entry(&self, id: Uuid) -> AppResult<()> {
        self.mutate(|snapshot| {
            let before = snapshot.packing_entries.len();
            snapshot.packing_entries.retain(|e| e.id != id);

            if snapshot.packing_entries.len() == before {
                return Err(AppError::not_found("Packing entry"));
            }
            Ok(())
        })
        .await
    }

    async fn count_entries_for_item(&self, item_id: Uuid) -> AppResult<u64> {
        let inner = self.inner.lock().await;
        Ok(inner
            .packing_entries
            .iter()
            .filter(|e| e.item_id == item_id)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BagType, CreatePackingEntry, ItemCategory, PackingStatus};
    use time::macros::date;

    fn trip_input(name: &str) -> CreateTrip {
        CreateTrip {
            name: name.to_string(),
            start_date: date!(2026 - 07 - 01),
            end_date: date!(2026 - 07 - 10),
        }
    }

    #[tokio::test]
    async fn test_duplicate_names_conflict() {
        let store = LocalStore::new();
        let input = CreateItemTemplate {
            name: "Toothbrush".to_string(),
            category: ItemCategory::Toiletries,
        };

        store.create_item_template(&input).await.unwrap();
        let result = store.create_item_template(&input).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let store = LocalStore::new();
        let bag = store
            .create_bag_template(&CreateBagTemplate {
                name: "Blue backpack".to_string(),
                bag_type: BagType::Backpack,
            })
            .await
            .unwrap();

        let updated = store
            .update_bag_template(
                bag.id,
                &UpdateBagTemplate {
                    name: Some("Blue backpack".to_string()),
                    bag_type: Some(BagType::CarryOn),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.bag_type, BagType::CarryOn);
    }

    #[tokio::test]
    async fn test_list_trips_ordered_and_paged() {
        let store = LocalStore::new();
        let mut late = trip_input("Autumn");
        late.start_date = date!(2026 - 10 - 01);
        late.end_date = date!(2026 - 10 - 05);
        store.create_trip(&late).await.unwrap();
        store.create_trip(&trip_input("Summer")).await.unwrap();

        let trips = store.list_trips(10, 0).await.unwrap();
        let names: Vec<_> = trips.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Summer", "Autumn"]);

        let second = store.list_trips(1, 1).await.unwrap();
        assert_eq!(second[0].name, "Autumn");
        assert_eq!(store.count_trips().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_trip_cascades() {
        let store = LocalStore::new();
        let trip = store.create_trip(&trip_input("Lisbon")).await.unwrap();
        let other = store.create_trip(&trip_input("Porto")).await.unwrap();
        let bag_id = Uuid::new_v4();
        store.attach_bag(trip.id, bag_id).await.unwrap();
        store.attach_bag(other.id, bag_id).await.unwrap();

        for trip_id in [trip.id, other.id] {
            let entry = PackingEntry::new(&CreatePackingEntry {
                trip_id,
                item_id: Uuid::new_v4(),
                bag_id: Some(bag_id),
                quantity: 1,
                status: PackingStatus::Unpacked,
            });
            store.insert_entry(&entry).await.unwrap();
        }

        store.delete_trip(trip.id).await.unwrap();

        assert!(store.list_entries(trip.id).await.unwrap().is_empty());
        assert!(store.list_trip_bags(trip.id).await.unwrap().is_empty());
        assert_eq!(store.list_entries(other.id).await.unwrap().len(), 1);
        assert_eq!(store.count_trips_using_bag(bag_id).await.unwrap(), 1);
        assert!(matches!(
            store.delete_trip(trip.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_entry_key_is_unique() {
        let store = LocalStore::new();
        let input = CreatePackingEntry {
            trip_id: Uuid::new_v4(),
            item_id: Uuid::new_v4(),
            bag_id: None,
            quantity: 1,
            status: PackingStatus::Unpacked,
        };

        store.insert_entry(&PackingEntry::new(&input)).await.unwrap();
        let result = store.insert_entry(&PackingEntry::new(&input)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip-packer.json");

        let store = LocalStore::open(&path).await.unwrap();
        let trip = store.create_trip(&trip_input("Kyoto")).await.unwrap();
        let item = store
            .create_item_template(&CreateItemTemplate {
                name: "Passport".to_string(),
                category: ItemCategory::Documents,
            })
            .await
            .unwrap();
        let entry = PackingEntry::new(&CreatePackingEntry {
            trip_id: trip.id,
            item_id: item.id,
            bag_id: None,
            quantity: 1,
            status: PackingStatus::ToBuy,
        });
        store.insert_entry(&entry).await.unwrap();
        drop(store);

        let reopened = LocalStore::open(&path).await.unwrap();
        let loaded = reopened.find_trip(trip.id).await.unwrap();
        assert_eq!(loaded.start_date, date!(2026 - 07 - 01));
        assert_eq!(reopened.find_entry(entry.id).await.unwrap(), entry);
        assert_eq!(
            reopened.find_item_template(item.id).await.unwrap().category,
            ItemCategory::Documents
        );
    }

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("absent.json"))
            .await
            .unwrap();
        assert_eq!(store.count_trips().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("gone").join("snapshot.json"))
            .await
            .unwrap();

        let result = store.create_trip(&trip_input("Rome")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(store.count_trips().await.unwrap(), 0);

        // Once the directory exists the same trip goes through
        std::fs::create_dir(dir.path().join("gone")).unwrap();
        let trip = store.create_trip(&trip_input("Rome")).await.unwrap();
        assert_eq!(store.find_trip(trip.id).await.unwrap().name, "Rome");
        assert_eq!(store.count_trips().await.unwrap(), 1);
    }
}
