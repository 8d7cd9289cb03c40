pub mod data_service;
pub mod sync_service;

pub use data_service::DataService;
pub use sync_service::{SyncDirection, SyncService};
