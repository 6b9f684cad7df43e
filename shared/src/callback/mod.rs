pub mod context;
pub mod error;
pub mod invoke;
pub mod manager;
pub mod registry;
pub mod value;
