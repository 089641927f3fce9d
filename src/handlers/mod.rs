pub mod create;
pub mod delete;
pub mod dispatch;
pub mod list;
pub mod modify;
