pub mod notifier;
pub mod repository;
pub mod sheet;
