use std::sync::Arc;

use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{BagGroup, BagTemplate, CreateTrip, Overview, Trip, TripBag, UpdateTrip};
use crate::repositories::{TemplateStore, TripStore};
use crate::services::PackingService;

/// Everything a trip screen shows at once
#[derive(Debug, Clone)]
pub struct TripDetail {
    pub trip: Trip,
    pub bags: Vec<BagTemplate>,
    pub overview: Overview,
    pub groups: Vec<BagGroup>,
}

#[derive(Clone)]
pub struct TripService {
    trips: Arc<dyn TripStore>,
    templates: Arc<dyn TemplateStore>,
    packing: PackingService,
}

impl TripService {
    pub fn new(trips: Arc<dyn TripStore>, templates: Arc<dyn TemplateStore>) -> Self {
        let packing = PackingService::new(trips.clone(), templates.clone());
        Self {
            trips,
            templates,
            packing,
        }
    }

    pub async fn create_trip(&self, input: &CreateTrip) -> AppResult<Trip> {
        validate_date_range(input.start_date, input.end_date)?;

        let trip = self.trips.create_trip(input).await?;
        tracing::info!(trip_id = %trip.id, name = %trip.name, "Created trip");
        Ok(trip)
    }

    pub async fn get_trip(&self, id: Uuid) -> AppResult<Trip> {
        self.trips.find_trip(id).await
    }

    /// One page of trips plus the total count
    pub async fn list_trips(&self, limit: u64, offset: u64) -> AppResult<(Vec<Trip>, u64)> {
        let trips = self.trips.list_trips(limit, offset).await?;
        let total = self.trips.count_trips().await?;
        Ok((trips, total))
    }

    /// Partial update; the date range is checked on the merged trip
    pub async fn update_trip(&self, id: Uuid, input: &UpdateTrip) -> AppResult<Trip> {
        let current = self.trips.find_trip(id).await?;
        validate_date_range(
            input.start_date.unwrap_or(current.start_date),
            input.end_date.unwrap_or(current.end_date),
        )?;

        self.trips.update_trip(id, input).await
    }

    /// Delete a trip with its bag associations and packing entries.
    /// Templates are left alone.
    pub async fn delete_trip(&self, id: Uuid) -> AppResult<()> {
        self.trips.delete_trip(id).await?;
        tracing::info!(trip_id = %id, "Deleted trip");
        Ok(())
    }

    pub async fn attach_bag(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<TripBag> {
        self.trips.find_trip(trip_id).await?;
        self.templates.find_bag_template(bag_id).await?;

        let trip_bag = self.trips.attach_bag(trip_id, bag_id).await?;
        tracing::info!(trip_id = %trip_id, bag_id = %bag_id, "Attached bag to trip");
        Ok(trip_bag)
    }

    /// Take a bag off a trip. Its entries become unassigned; an entry whose
    /// item is already unassigned is folded into that entry.
    pub async fn detach_bag(&self, trip_id: Uuid, bag_id: Uuid) -> AppResult<()> {
        self.trips.find_trip(trip_id).await?;

        let on_trip = self
            .trips
            .list_trip_bags(trip_id)
            .await?
            .iter()
            .any(|tb| tb.bag_id == bag_id);
        if !on_trip {
            return Err(AppError::not_found("Trip bag"));
        }

        // Work out every fold first so an oversized quantity fails before any write
        let now = OffsetDateTime::now_utc();
        let mut moves = Vec::new();
        for mut entry in self
            .trips
            .list_entries(trip_id)
            .await?
            .into_iter()
            .filter(|e| e.bag_id == Some(bag_id))
        {
            match self
                .trips
                .find_entry_by_key(trip_id, entry.item_id, None)
                .await?
            {
                Some(mut loose) => {
                    loose.quantity = loose
                        .quantity
                        .checked_add(entry.quantity)
                        .ok_or_else(|| AppError::validation("Quantity is too large"))?;
                    loose.updated_at = now;
                    moves.push((Some(entry.id), loose));
                }
                None => {
                    entry.bag_id = None;
                    entry.updated_at = now;
                    moves.push((None, entry));
                }
            }
        }

        for (folded, entry) in moves {
            if let Some(folded) = folded {
                self.trips.delete_entry(folded).await?;
            }
            self.trips.save_entry(&entry).await?;
        }

        self.trips.detach_bag(trip_id, bag_id).await?;
        tracing::info!(trip_id = %trip_id, bag_id = %bag_id, "Detached bag from trip");
        Ok(())
    }

    pub async fn list_bags(&self, trip_id: Uuid) -> AppResult<Vec<BagTemplate>> {
        self.trips.find_trip(trip_id).await?;
        self.packing.trip_bags(trip_id).await
    }

    pub async fn detail(&self, trip_id: Uuid) -> AppResult<TripDetail> {
        let trip = self.trips.find_trip(trip_id).await?;
        let bags = self.packing.trip_bags(trip_id).await?;
        let entries = self.trips.list_entries(trip_id).await?;

        Ok(TripDetail {
            overview: Overview::from_entries(trip_id, &entries),
            groups: crate::services::group_by_bag(&entries, &bags),
            trip,
            bags,
        })
    }
}

fn validate_date_range(start_date: Date, end_date: Date) -> AppResult<()> {
    if start_date > end_date {
        return Err(AppError::validation(
            "start_date must not be after end_date",
        ));
    }
    Ok(())
}
