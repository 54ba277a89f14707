pub mod adapter;
pub mod engine;
pub mod types;

pub use adapter::EphemerisAdapter;
pub use engine::{EphemerisEngine, SwissEngine};
pub use types::{Body, BodyPosition, HouseData};
