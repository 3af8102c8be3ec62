//! Web 路由处理器

pub mod api;
pub mod system;

pub use api::*;
pub use system::*;
