pub mod client;
pub mod session;

pub use client::ApiClient;
pub use session::Session;
