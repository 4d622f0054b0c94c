//! Data models for SportLend

pub mod borrow_record;
pub mod change;
pub mod dashboard;
pub mod equipment;

// Re-export commonly used types
pub use borrow_record::{BorrowRecord, BorrowRecordDetails, BorrowStatus};
pub use change::ChangeEvent;
pub use dashboard::{Dashboard, DashboardTotals};
pub use equipment::Equipment;
