pub mod aggregate;
pub mod config;
pub mod discretize;
pub mod error;
pub mod progress;
pub mod rates;
pub mod rle;
pub mod transitions;
