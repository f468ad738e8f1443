pub mod com;
pub mod layer_files;
pub mod report;
