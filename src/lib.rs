pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod load;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod preprocess;
pub mod report;
pub mod session;
