pub mod ask;
pub mod extract;
pub mod info;
pub mod read_pages;
