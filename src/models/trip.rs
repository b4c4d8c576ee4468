use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateTrip {
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTrip {
    pub name: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Association between a trip and one of the bag templates it uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripBag {
    pub trip_id: Uuid,
    pub bag_id: Uuid,
    pub created_at: OffsetDateTime,
}
