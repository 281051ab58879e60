pub mod participations;
pub mod sheets;
