pub mod keywords;
pub mod llm_provider;
pub mod suggestions;
pub mod text_extract;
