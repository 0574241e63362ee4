pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod reminder;
pub mod repository;
pub mod stats;
pub mod storage;

pub use error::AppError;
pub use model::{Priority, ReminderHandle, Task};
pub use repository::TaskRepository;
pub use stats::Statistics;
