pub mod config;
pub mod notification;
pub mod project;
pub mod session;
pub mod task;
pub mod team;

pub use config::*;
pub use notification::*;
pub use project::*;
pub use session::*;
pub use task::*;
pub use team::*;
