pub mod participant;
pub mod region;
pub mod academic;
pub mod contribution;
pub mod event_settings;
