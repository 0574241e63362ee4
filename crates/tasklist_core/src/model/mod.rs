mod task;

pub use task::{Priority, ReminderHandle, Task};
