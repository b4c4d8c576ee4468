use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of luggage a bag template describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BagType {
    Backpack,
    CarryOn,
    CheckedMedium,
    CheckedLarge,
}

impl BagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backpack => "BACKPACK",
            Self::CarryOn => "CARRY_ON",
            Self::CheckedMedium => "CHECKED_MEDIUM",
            Self::CheckedLarge => "CHECKED_LARGE",
        }
    }
}

impl FromStr for BagType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BACKPACK" => Ok(Self::Backpack),
            "CARRY_ON" => Ok(Self::CarryOn),
            "CHECKED_MEDIUM" => Ok(Self::CheckedMedium),
            "CHECKED_LARGE" => Ok(Self::CheckedLarge),
            other => Err(format!("unknown bag type '{}'", other)),
        }
    }
}

/// Reusable bag definition; trips reference it through `TripBag`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BagTemplate {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub bag_type: BagType,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateBagTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub bag_type: BagType,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBagTemplate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub bag_type: Option<BagType>,
}
