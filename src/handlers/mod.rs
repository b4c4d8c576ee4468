pub mod bag_template;
pub mod common;
pub mod health;
pub mod item_template;
pub mod packing;
pub mod trip;

pub use bag_template::{
    create_bag_template, delete_bag_template, get_bag_template, list_bag_templates,
    update_bag_template, BagTemplateListResponse, BagTemplateResponse, CreateBagTemplateRequest,
    UpdateBagTemplateRequest,
};
pub use common::{validate_optional, validate_required, PaginationParams};
pub use health::{health, HealthResponse};
pub use item_template::{
    create_item_template, delete_item_template, get_item_template, list_item_templates,
    update_item_template, CreateItemTemplateRequest, ItemTemplateListResponse,
    ItemTemplateResponse, UpdateItemTemplateRequest,
};
pub use packing::{
    add_entry, delete_entry, get_entry, get_overview, list_entries, list_groups, move_entry,
    update_entry, AddEntryRequest, BagGroupResponse, MoveEntryRequest, PackingEntryResponse,
    PackingLineResponse, PackingListResponse, UpdateEntryRequest,
};
pub use trip::{
    attach_bag, create_trip, delete_trip, detach_bag, get_trip, get_trip_detail,
    list_trip_bags, list_trips, update_trip, CreateTripRequest, TripBagResponse,
    TripDetailResponse, TripListResponse, TripResponse, UpdateTripRequest,
};
