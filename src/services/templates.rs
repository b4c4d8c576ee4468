use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    BagTemplate, CreateBagTemplate, CreateItemTemplate, ItemTemplate, UpdateBagTemplate,
    UpdateItemTemplate,
};
use crate::repositories::{TemplateStore, TripStore};

/// Item and bag template management.
///
/// Templates still referenced by a trip cannot be deleted: an item template
/// while any packing entry uses it, a bag template while any trip carries it.
#[derive(Clone)]
pub struct TemplateService {
    templates: Arc<dyn TemplateStore>,
    trips: Arc<dyn TripStore>,
}

impl TemplateService {
    pub fn new(templates: Arc<dyn TemplateStore>, trips: Arc<dyn TripStore>) -> Self {
        Self { templates, trips }
    }

    pub async fn create_item_template(
        &self,
        input: &CreateItemTemplate,
    ) -> AppResult<ItemTemplate> {
        let template = self.templates.create_item_template(input).await?;
        tracing::info!(item_id = %template.id, name = %template.name, "Created item template");
        Ok(template)
    }

    pub async fn get_item_template(&self, id: Uuid) -> AppResult<ItemTemplate> {
        self.templates.find_item_template(id).await
    }

    /// One page of item templates plus the total count
    pub async fn list_item_templates(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<ItemTemplate>, u64)> {
        let templates = self.templates.list_item_templates(limit, offset).await?;
        let total = self.templates.count_item_templates().await?;
        Ok((templates, total))
    }

    pub async fn update_item_template(
        &self,
        id: Uuid,
        input: &UpdateItemTemplate,
    ) -> AppResult<ItemTemplate> {
        self.templates.update_item_template(id, input).await
    }

    pub async fn delete_item_template(&self, id: Uuid) -> AppResult<()> {
        self.templates.find_item_template(id).await?;

        let in_use = self.trips.count_entries_for_item(id).await?;
        if in_use > 0 {
            return Err(AppError::conflict(format!(
                "Item template is used by {} packing entries",
                in_use
            )));
        }

        self.templates.delete_item_template(id).await?;
        tracing::info!(item_id = %id, "Deleted item template");
        Ok(())
    }

    pub async fn create_bag_template(&self, input: &CreateBagTemplate) -> AppResult<BagTemplate> {
        let template = self.templates.create_bag_template(input).await?;
        tracing::info!(bag_id = %template.id, name = %template.name, "Created bag template");
        Ok(template)
    }

    pub async fn get_bag_template(&self, id: Uuid) -> AppResult<BagTemplate> {
        self.templates.find_bag_template(id).await
    }

    /// One page of bag templates plus the total count
    pub async fn list_bag_templates(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<BagTemplate>, u64)> {
        let templates = self.templates.list_bag_templates(limit, offset).await?;
        let total = self.templates.count_bag_templates().await?;
        Ok((templates, total))
    }

    pub async fn update_bag_template(
        &self,
        id: Uuid,
        input: &UpdateBagTemplate,
    ) -> AppResult<BagTemplate> {
        self.templates.update_bag_template(id, input).await
    }

    pub async fn delete_bag_template(&self, id: Uuid) -> AppResult<()> {
        self.templates.find_bag_template(id).await?;

        let in_use = self.trips.count_trips_using_bag(id).await?;
        if in_use > 0 {
            return Err(AppError::conflict(format!(
                "Bag template is used by {} trips",
                in_use
            )));
        }

        self.templates.delete_bag_template(id).await?;
        tracing::info!(bag_id = %id, "Deleted bag template");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BagType, CreatePackingEntry, CreateTrip, ItemCategory, PackingEntry, PackingStatus,
    };
    use crate::repositories::LocalStore;
    use time::macros::date;

    fn service(store: &LocalStore) -> TemplateService {
        TemplateService::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    async fn trip(store: &LocalStore) -> Uuid {
        store
            .create_trip(&CreateTrip {
                name: "Rome".to_string(),
                start_date: date!(2026 - 05 - 01),
                end_date: date!(2026 - 05 - 04),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_item_template_crud() {
        let store = LocalStore::new();
        let service = service(&store);

        let created = service
            .create_item_template(&CreateItemTemplate {
                name: "Umbrella".to_string(),
                category: ItemCategory::Accessories,
            })
            .await
            .unwrap();

        let updated = service
            .update_item_template(
                created.id,
                &UpdateItemTemplate {
                    category: Some(ItemCategory::Other),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Umbrella");
        assert_eq!(updated.category, ItemCategory::Other);

        let (page, total) = service.list_item_templates(20, 0).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].id, created.id);

        service.delete_item_template(created.id).await.unwrap();
        assert!(matches!(
            service.get_item_template(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_item_in_use_is_blocked() {
        let store = LocalStore::new();
        let service = service(&store);
        let trip_id = trip(&store).await;
        let item = service
            .create_item_template(&CreateItemTemplate {
                name: "Adapter".to_string(),
                category: ItemCategory::Electronics,
            })
            .await
            .unwrap();

        let entry = PackingEntry::new(&CreatePackingEntry {
            trip_id,
            item_id: item.id,
            bag_id: None,
            quantity: 1,
            status: PackingStatus::Unpacked,
        });
        store.insert_entry(&entry).await.unwrap();

        let result = service.delete_item_template(item.id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(service.get_item_template(item.id).await.is_ok());

        store.delete_entry(entry.id).await.unwrap();
        service.delete_item_template(item.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_bag_in_use_is_blocked() {
        let store = LocalStore::new();
        let service = service(&store);
        let trip_id = trip(&store).await;
        let bag = service
            .create_bag_template(&CreateBagTemplate {
                name: "Red suitcase".to_string(),
                bag_type: BagType::CheckedLarge,
            })
            .await
            .unwrap();
        store.attach_bag(trip_id, bag.id).await.unwrap();

        let result = service.delete_bag_template(bag.id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        store.detach_bag(trip_id, bag.id).await.unwrap();
        service.delete_bag_template(bag.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_unknown_template_not_found() {
        let store = LocalStore::new();
        let service = service(&store);

        assert!(matches!(
            service.delete_item_template(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_bag_template(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
