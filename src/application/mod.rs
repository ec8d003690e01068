// Application layer - Session controllers and derived-view logic
pub mod command;
pub mod motion_service;
pub mod pagination;
pub mod reading_store;
pub mod temperature_service;
pub mod views;
