pub mod auth;
pub mod client;
pub mod traits;

pub use auth::ApiKey;
pub use client::OpenAiClient;
pub use traits::ChatCompletion;
