pub mod chapter_details;
pub mod chapter_index;
pub mod research;

pub use chapter_details::get_chapter_details;
pub use chapter_index::list_chapters;
pub use research::answer_question;
