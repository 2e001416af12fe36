pub mod block;
pub mod catalog;
pub mod labels;
pub mod log;
pub mod write;
