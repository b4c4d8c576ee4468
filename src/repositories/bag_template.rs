use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::bag_template::{self, ActiveModel, Column, Entity as BagTemplateEntity};
use crate::error::{AppError, AppResult};
use crate::models::{BagTemplate, CreateBagTemplate, UpdateBagTemplate};
use crate::repositories::Repository;

/// Bag template repository for database operations
pub struct BagTemplateRepository;

#[async_trait]
impl Repository<BagTemplate> for BagTemplateRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<BagTemplate> {
        let model = BagTemplateEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Bag template"))?;

        model.try_into()
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = BagTemplateEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Bag template"));
        }

        Ok(())
    }

    async fn list(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<BagTemplate>> {
        let models = BagTemplateEntity::find()
            .order_by_asc(Column::Name)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;

        models.into_iter().map(BagTemplate::try_from).collect()
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = BagTemplateEntity::find().count(db).await?;
        Ok(count)
    }
}

impl BagTemplateRepository {
    /// Create a new bag template
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateBagTemplate,
    ) -> AppResult<BagTemplate> {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            bag_type: Set(input.bag_type.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        result.try_into()
    }

    /// Update a bag template
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdateBagTemplate,
    ) -> AppResult<BagTemplate> {
        let model = BagTemplateEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("Bag template"))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(bag_type) = input.bag_type {
            active.bag_type = Set(bag_type.as_str().to_string());
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        result.try_into()
    }
}

// Conversion from SeaORM model to our domain model
impl TryFrom<bag_template::Model> for BagTemplate {
    type Error = AppError;

    fn try_from(m: bag_template::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            name: m.name,
            bag_type: m.bag_type.parse().map_err(AppError::Database)?,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}
