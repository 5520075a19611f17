pub mod location;
pub mod lookup;
pub mod stock;
