//! Loading landmark exports into the place repository.

mod startup;

pub use startup::{SeedingError, read_landmark_export, seed_places_on_startup};
