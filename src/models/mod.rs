pub mod bag_template;
pub mod item_template;
pub mod packing_entry;
pub mod trip;

pub use bag_template::*;
pub use item_template::*;
pub use packing_entry::*;
pub use trip::*;
