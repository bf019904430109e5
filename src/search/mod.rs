pub mod results;
pub mod retriever;
pub mod runner;
