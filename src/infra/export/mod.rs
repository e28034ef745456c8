pub mod csv;
pub mod delivery;
