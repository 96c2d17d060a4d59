pub mod auth;
pub mod debounce;
pub mod filter;
pub mod kanban;
pub mod notifications;
pub mod search;
pub mod stats;
pub mod store;
