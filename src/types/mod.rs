pub mod observation;
pub mod station;
pub mod timestamp;
