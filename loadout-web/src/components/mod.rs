pub mod button;
pub mod card;
pub mod footer;
pub mod header;
