//! Application services: enqueue dispatch, pending-task listing, promotion.

pub mod enqueue;
pub mod fetch;
pub mod promote;

pub use enqueue::EnqueueService;
pub use fetch::{DEFAULT_FETCH_LIMIT, TaskFetchService};
pub use promote::{PROMOTION_BATCH_LIMIT, PromotionFailure, PromotionReport, PromotionService};
