pub mod packing;
pub mod templates;
pub mod trips;

pub use packing::{group_by_bag, PackingLine, PackingService};
pub use templates::TemplateService;
pub use trips::{TripDetail, TripService};
