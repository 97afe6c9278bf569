pub mod config;
pub mod export;
pub mod load;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod partition;
pub mod pipeline;
pub mod project;

pub mod cli;
pub mod error;
pub mod logging;
