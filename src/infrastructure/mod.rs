// Infrastructure layer - External transports and adapters
pub mod config;
pub mod csv_export;
pub mod push_channel;
pub mod realtime_feed;
pub mod rest_store;
pub mod sse;
