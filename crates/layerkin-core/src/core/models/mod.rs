pub mod layer;
pub mod run;
pub mod tally;
pub mod trajectory;
