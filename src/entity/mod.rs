pub mod bag_template;
pub mod item_template;
pub mod packing_entry;
pub mod trip;
pub mod trip_bag;
