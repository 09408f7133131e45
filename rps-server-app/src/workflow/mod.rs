pub mod gameplay;
pub mod stats;
