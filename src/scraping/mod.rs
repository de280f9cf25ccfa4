pub mod extractor;
pub mod fetcher;
pub mod headers;
pub mod text;
