pub mod kinetics;
pub mod layers;
