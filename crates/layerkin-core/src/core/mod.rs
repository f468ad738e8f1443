pub mod io;
pub mod models;
