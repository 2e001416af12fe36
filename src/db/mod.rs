pub mod audit;
pub mod cells;
pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod rows;
pub mod sheets;
pub mod stats;
