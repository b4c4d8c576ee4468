use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Category of a packable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Clothing,
    Electronics,
    Toiletries,
    Documents,
    Medication,
    Accessories,
    Other,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clothing => "CLOTHING",
            Self::Electronics => "ELECTRONICS",
            Self::Toiletries => "TOILETRIES",
            Self::Documents => "DOCUMENTS",
            Self::Medication => "MEDICATION",
            Self::Accessories => "ACCESSORIES",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLOTHING" => Ok(Self::Clothing),
            "ELECTRONICS" => Ok(Self::Electronics),
            "TOILETRIES" => Ok(Self::Toiletries),
            "DOCUMENTS" => Ok(Self::Documents),
            "MEDICATION" => Ok(Self::Medication),
            "ACCESSORIES" => Ok(Self::Accessories),
            "OTHER" => Ok(Self::Other),
            other => Err(format!("unknown item category '{}'", other)),
        }
    }
}

/// Reusable item definition shared across trips
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: Uuid,
    pub name: String,
    pub category: ItemCategory,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemTemplate {
    pub name: String,
    pub category: ItemCategory,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemTemplate {
    pub name: Option<String>,
    pub category: Option<ItemCategory>,
}
