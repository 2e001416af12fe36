pub mod colors;
pub mod path;
pub mod table;
pub mod text;
