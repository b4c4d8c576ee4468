use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Packing status of an entry. Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackingStatus {
    #[default]
    Unpacked,
    Packed,
    ToBuy,
}

impl PackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpacked => "UNPACKED",
            Self::Packed => "PACKED",
            Self::ToBuy => "TO_BUY",
        }
    }
}

impl FromStr for PackingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNPACKED" => Ok(Self::Unpacked),
            "PACKED" => Ok(Self::Packed),
            "TO_BUY" => Ok(Self::ToBuy),
            other => Err(format!("unknown packing status '{}'", other)),
        }
    }
}

/// One item of a trip, in an optional bag, with quantity and status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingEntry {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub item_id: Uuid,
    /// `None` means the entry is not assigned to any bag yet
    pub bag_id: Option<Uuid>,
    pub quantity: i32,
    pub status: PackingStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl PackingEntry {
    pub fn new(input: &CreatePackingEntry) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            trip_id: input.trip_id,
            item_id: input.item_id,
            bag_id: input.bag_id,
            quantity: input.quantity,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePackingEntry {
    pub trip_id: Uuid,
    pub item_id: Uuid,
    pub bag_id: Option<Uuid>,
    pub quantity: i32,
    pub status: PackingStatus,
}

/// Partial update of a packing entry.
///
/// `bag_id` is doubly optional: `None` leaves the bag untouched,
/// `Some(None)` unassigns the entry and `Some(Some(id))` moves it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackingEntryPatch {
    pub quantity: Option<i32>,
    pub status: Option<PackingStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub bag_id: Option<Option<Uuid>>,
}

impl PackingEntryPatch {
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.status.is_none() && self.bag_id.is_none()
    }
}

/// Entry counts of a trip by status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Overview {
    pub trip_id: Uuid,
    pub total: u64,
    #[serde(rename = "UNPACKED")]
    pub unpacked: u64,
    #[serde(rename = "PACKED")]
    pub packed: u64,
    #[serde(rename = "TO_BUY")]
    pub to_buy: u64,
}

impl Overview {
    /// Count entries by status in a single pass
    pub fn from_entries<'a>(
        trip_id: Uuid,
        entries: impl IntoIterator<Item = &'a PackingEntry>,
    ) -> Self {
        let mut overview = Self {
            trip_id,
            total: 0,
            unpacked: 0,
            packed: 0,
            to_buy: 0,
        };

        for entry in entries {
            overview.total += 1;
            match entry.status {
                PackingStatus::Unpacked => overview.unpacked += 1,
                PackingStatus::Packed => overview.packed += 1,
                PackingStatus::ToBuy => overview.to_buy += 1,
            }
        }

        overview
    }
}

/// Name of the group holding entries that are not in any bag
pub const UNASSIGNED: &str = "Unassigned";

/// Entries sharing one bag (or none), for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagGroup {
    pub bag_id: Option<Uuid>,
    pub bag_name: String,
    pub entries: Vec<PackingEntry>,
}
