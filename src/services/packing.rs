use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    BagGroup, BagTemplate, CreatePackingEntry, ItemTemplate, Overview, PackingEntry,
    PackingEntryPatch, UNASSIGNED,
};
use crate::repositories::{TemplateStore, TripStore};

/// A packing entry joined with the templates it points at
#[derive(Debug, Clone)]
pub struct PackingLine {
    pub entry: PackingEntry,
    pub item: ItemTemplate,
    pub bag: Option<BagTemplate>,
}

/// Packing entry manager and bag assignment rules.
///
/// Every operation re-reads the store; nothing derived (such as the
/// overview counts) is kept between calls.
#[derive(Clone)]
pub struct PackingService {
    trips: Arc<dyn TripStore>,
    templates: Arc<dyn TemplateStore>,
}

impl PackingService {
    pub fn new(trips: Arc<dyn TripStore>, templates: Arc<dyn TemplateStore>) -> Self {
        Self { trips, templates }
    }

    /// Add an item to a trip.
    ///
    /// Adding an item to a bag (or to "unassigned") where it already has an
    /// entry merges the quantities into that entry and keeps its status.
    pub async fn add_entry(&self, input: CreatePackingEntry) -> AppResult<PackingEntry> {
        validate_quantity(input.quantity)?;

        match self.trips.find_trip(input.trip_id).await {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                return Err(AppError::validation(format!(
                    "Trip {} does not exist",
                    input.trip_id
                )))
            }
            Err(err) => return Err(err),
        }

        match self.templates.find_item_template(input.item_id).await {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                return Err(AppError::validation(format!(
                    "Item template {} does not exist",
                    input.item_id
                )))
            }
            Err(err) => return Err(err),
        }

        if let Some(bag_id) = input.bag_id {
            self.ensure_bag_on_trip(input.trip_id, bag_id).await?;
        }

        let existing = self
            .trips
            .find_entry_by_key(input.trip_id, input.item_id, input.bag_id)
            .await?;

        if let Some(mut entry) = existing {
            entry.quantity = entry
                .quantity
                .checked_add(input.quantity)
                .ok_or_else(|| AppError::validation("Quantity is too large"))?;
            entry.updated_at = OffsetDateTime::now_utc();

            let entry = self.trips.save_entry(&entry).await?;
            tracing::info!(
                entry_id = %entry.id,
                trip_id = %entry.trip_id,
                quantity = entry.quantity,
                "Merged packing entry"
            );
            return Ok(entry);
        }

        let entry = self.trips.insert_entry(&PackingEntry::new(&input)).await?;
        tracing::info!(
            entry_id = %entry.id,
            trip_id = %entry.trip_id,
            item_id = %entry.item_id,
            "Added packing entry"
        );
        Ok(entry)
    }

    pub async fn get_entry(&self, entry_id: Uuid) -> AppResult<PackingEntry> {
        self.trips.find_entry(entry_id).await
    }

    /// Entries of a trip in creation order
    pub async fn list_entries(&self, trip_id: Uuid) -> AppResult<Vec<PackingEntry>> {
        self.trips.find_trip(trip_id).await?;
        self.trips.list_entries(trip_id).await
    }

    /// Apply a partial update. Nothing is written unless every field is valid.
    pub async fn update_entry(
        &self,
        entry_id: Uuid,
        patch: &PackingEntryPatch,
    ) -> AppResult<PackingEntry> {
        let mut entry = self.trips.find_entry(entry_id).await?;

        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(Some(bag_id)) = patch.bag_id {
            self.ensure_bag_on_trip(entry.trip_id, bag_id).await?;
        }

        if patch.is_empty() {
            return Ok(entry);
        }

        if let Some(quantity) = patch.quantity {
            entry.quantity = quantity;
        }
        if let Some(status) = patch.status {
            entry.status = status;
        }
        if let Some(bag_id) = patch.bag_id {
            entry.bag_id = bag_id;
        }
        entry.updated_at = OffsetDateTime::now_utc();

        let entry = self.trips.save_entry(&entry).await?;
        tracing::debug!(
            entry_id = %entry.id,
            status = entry.status.as_str(),
            quantity = entry.quantity,
            "Updated packing entry"
        );
        Ok(entry)
    }

    /// Delete an entry; `NotFound` if it is already gone
    pub async fn remove_entry(&self, entry_id: Uuid) -> AppResult<()> {
        self.trips.delete_entry(entry_id).await?;
        tracing::info!(entry_id = %entry_id, "Removed packing entry");
        Ok(())
    }

    /// Count a trip's entries by status, straight from the store
    pub async fn get_overview(&self, trip_id: Uuid) -> AppResult<Overview> {
        self.trips.find_trip(trip_id).await?;
        let entries = self.trips.list_entries(trip_id).await?;
        Ok(Overview::from_entries(trip_id, &entries))
    }

    /// Put an entry in another bag of its trip, or unassign it with `None`
    pub async fn move_entry(
        &self,
        entry_id: Uuid,
        new_bag_id: Option<Uuid>,
    ) -> AppResult<PackingEntry> {
        let patch = PackingEntryPatch {
            bag_id: Some(new_bag_id),
            ..Default::default()
        };
        self.update_entry(entry_id, &patch).await
    }

    /// Bags of a trip in the order they were added
    pub async fn trip_bags(&self, trip_id: Uuid) -> AppResult<Vec<BagTemplate>> {
        let trip_bags = self.trips.list_trip_bags(trip_id).await?;

        let mut bags = Vec::with_capacity(trip_bags.len());
        for trip_bag in trip_bags {
            bags.push(self.templates.find_bag_template(trip_bag.bag_id).await?);
        }
        Ok(bags)
    }

    /// Entries of a trip grouped by bag, see [`group_by_bag`]
    pub async fn grouped_entries(&self, trip_id: Uuid) -> AppResult<Vec<BagGroup>> {
        let entries = self.list_entries(trip_id).await?;
        let bags = self.trip_bags(trip_id).await?;
        Ok(group_by_bag(&entries, &bags))
    }

    /// Entries of a trip with their item and bag templates resolved
    pub async fn packing_list(&self, trip_id: Uuid) -> AppResult<Vec<PackingLine>> {
        let entries = self.list_entries(trip_id).await?;
        let bags: HashMap<Uuid, BagTemplate> = self
            .trip_bags(trip_id)
            .await?
            .into_iter()
            .map(|bag| (bag.id, bag))
            .collect();

        let mut items: HashMap<Uuid, ItemTemplate> = HashMap::new();
        let mut lines = Vec::with_capacity(entries.len());
        for entry in entries {
            let item = match items.get(&entry.item_id) {
                Some(item) => item.clone(),
                None => {
                    let item = self.templates.find_item_template(entry.item_id).await?;
                    items.insert(item.id, item.clone());
                    item
                }
            };
            let bag = entry.bag_id.and_then(|id| bags.get(&id).cloned());
            lines.push(PackingLine { entry, item, bag });
        }

        Ok(lines)
    }

    async fn ensure_bag_on_trip(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<()> {
        let on_trip = self
            .trips
            .list_trip_bags(trip_id)
            .await?
            .iter()
            .any(|tb| tb.bag_id == bag_id);

        if !on_trip {
            return Err(AppError::validation(format!(
                "Bag {} is not associated with trip {}",
                bag_id, trip_id
            )));
        }
        Ok(())
    }
}

fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    Ok(())
}

/// Group entries by the bag they are in.
///
/// One group per bag, in the order of `bags`, even when empty, followed by
/// the [`UNASSIGNED`] group. Entries keep their relative order. An entry
/// whose bag is not in `bags` lands in the unassigned group.
pub fn group_by_bag(entries: &[PackingEntry], bags: &[BagTemplate]) -> Vec<BagGroup> {
    let mut groups: Vec<BagGroup> = bags
        .iter()
        .map(|bag| BagGroup {
            bag_id: Some(bag.id),
            bag_name: bag.name.clone(),
            entries: Vec::new(),
        })
        .collect();
    let index: HashMap<Uuid, usize> = bags
        .iter()
        .enumerate()
        .map(|(i, bag)| (bag.id, i))
        .collect();

    let mut unassigned = BagGroup {
        bag_id: None,
        bag_name: UNASSIGNED.to_string(),
        entries: Vec::new(),
    };

    for entry in entries {
        match entry.bag_id.and_then(|id| index.get(&id)) {
            Some(&i) => groups[i].entries.push(entry.clone()),
            None => unassigned.entries.push(entry.clone()),
        }
    }

    groups.push(unassigned);
    groups
}
