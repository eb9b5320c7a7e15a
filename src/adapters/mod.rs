// Adapters layer: concrete implementations of the domain ports.

pub mod llm;

pub use llm::OpenAiCompatibleClient;
