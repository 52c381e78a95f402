mod client;
mod types;

pub use client::{BedrockClient, ModelInvoker};
pub use types::*;

#[cfg(test)]
pub use client::MockModelInvoker;
