//! Background jobs.

mod reaper_job;

pub use reaper_job::{purchase_reaper_handler, PurchaseReaperJob};
