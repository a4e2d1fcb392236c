pub mod client;
mod documents;
mod employees;
mod requests;
pub mod types;

pub use client::*;
pub use documents::DOCUMENT_FALLBACK_MESSAGE;
pub use requests::SUBMIT_FALLBACK_MESSAGE;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
