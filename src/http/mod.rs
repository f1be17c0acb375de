pub mod handler;
pub mod request;
pub mod server;
