// Domain entities

pub mod config;
pub mod event;
pub mod scan;
pub mod service;
pub mod veteran;

pub use config::*;
pub use event::*;
pub use scan::*;
pub use service::*;
pub use veteran::*;
