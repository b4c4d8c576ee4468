use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::item_template::{self, ActiveModel, Column, Entity as ItemTemplateEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateItemTemplate, ItemTemplate, UpdateItemTemplate};
use crate::repositories::Repository;

/// Item template repository for database operations
pub struct ItemTemplateRepository;

#[async_trait]
impl Repository<ItemTemplate> for ItemTemplateRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<ItemTemplate> {
        let model = ItemTemplateEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Item template"))?;

        model.try_into()
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = ItemTemplateEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Item template"));
        }

        Ok(())
    }

    async fn list(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<ItemTemplate>> {
        let models = ItemTemplateEntity::find()
            .order_by_asc(Column::Name)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        models.into_iter().map(ItemTemplate::try_from).collect()
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = ItemTemplateEntity::find().count(db).await?;
        Ok(count)
    }
}

impl ItemTemplateRepository {
    /// Create a new item template
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateItemTemplate,
    ) -> AppResult<ItemTemplate> {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            category: Set(input.category.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        result.try_into()
    }

    /// Update an item template
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdateItemTemplate,
    ) -> AppResult<ItemTemplate> {
        let model = ItemTemplateEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Item template"))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(category) = input.category {
            active.category = Set(category.as_str().to_string());
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        result.try_into()
    }
}

// Conversion from SeaORM model to our domain model
impl TryFrom<item_template::Model> for ItemTemplate {
    type Error = AppError;

    fn try_from(m: item_template::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            name: m.name,
            category: m.category.parse().map_err(AppError::Database)?,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}
