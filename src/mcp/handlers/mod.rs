pub mod chapter_details;
pub mod common;
pub mod list_chapters;
pub mod quran_research;
