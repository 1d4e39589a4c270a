pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, RestaurantDefinition, load_restaurant};
