pub mod prompt;
pub mod providers;

pub use prompt::{PromptStyle, PromptTemplate};
pub use providers::{ProviderError, ProviderResponse, TextProvider};
