//! Domain model (ids, task records, reminder windows, cycle reports).

pub mod ids;
pub mod report;
pub mod task;
pub mod window;

pub use ids::{TaskId, UserId};
pub use report::{CycleReport, DeliveryResult};
pub use task::{Priority, TaskRecord};
pub use window::ReminderWindow;
