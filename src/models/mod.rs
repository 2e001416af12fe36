pub mod audit;
pub mod block;
pub mod cell;
pub mod row;
pub mod section;
pub mod sheet;
