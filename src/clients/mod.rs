pub mod http_client;
pub mod openai_client;

pub use openai_client::*;
