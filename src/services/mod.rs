pub mod content_provider;
pub mod content_service;
pub mod prompt_builder;
pub mod section_parser;

pub use content_provider::ContentProvider;
pub use content_service::ContentService;
