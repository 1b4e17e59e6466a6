pub mod executor;
pub mod http;
pub mod selector;
pub mod session;
