use time::macros::date;
use uuid::Uuid;

use trip_packer::models::{
    BagTemplate, BagType, CreateBagTemplate, CreateItemTemplate, CreatePackingEntry, CreateTrip,
    ItemCategory, ItemTemplate, PackingEntry, PackingStatus, Trip,
};
use trip_packer::state::AppState;

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create an item template with a unique name
    pub async fn create_item(&self) -> ItemTemplate {
        self.create_named_item(&format!("Item {}", Uuid::new_v4()))
            .await
    }

    pub async fn create_named_item(&self, name: &str) -> ItemTemplate {
        let input = CreateItemTemplate {
            name: name.to_string(),
            category: ItemCategory::Clothing,
        };

        self.state
            .templates
            .create_item_template(&input)
            .await
            .unwrap()
    }

    /// Create a bag template with a unique name
    pub async fn create_bag(&self) -> BagTemplate {
        self.create_named_bag(&format!("Bag {}", Uuid::new_v4()))
            .await
    }

    pub async fn create_named_bag(&self, name: &str) -> BagTemplate {
        let input = CreateBagTemplate {
            name: name.to_string(),
            bag_type: BagType::CarryOn,
        };

        self.state
            .templates
            .create_bag_template(&input)
            .await
            .unwrap()
    }

    /// Create a one-week trip with a unique name
    pub async fn create_trip(&self) -> Trip {
        let input = CreateTrip {
            name: format!("Trip {}", Uuid::new_v4()),
            start_date: date!(2026 - 07 - 01),
            end_date: date!(2026 - 07 - 08),
        };

        self.state.trips.create_trip(&input).await.unwrap()
    }

    /// Create a trip that already carries the given bag
    pub async fn create_trip_with_bag(&self, bag_id: Uuid) -> Trip {
        let trip = self.create_trip().await;
        self.state.trips.attach_bag(trip.id, bag_id).await.unwrap();
        trip
    }

    /// Add an entry through the packing service
    pub async fn create_entry(
        &self,
        trip_id: Uuid,
        item_id: Uuid,
        bag_id: Option<Uuid>,
        quantity: i32,
    ) -> PackingEntry {
        let input = CreatePackingEntry {
            trip_id,
            item_id,
            bag_id,
            quantity,
            status: PackingStatus::Unpacked,
        };

        self.state.packing.add_entry(input).await.unwrap()
    }
}
