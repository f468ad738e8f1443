//! # Layerkin Core Library
//!
//! A library for layer-resolved residence-time and hopping-rate analysis of
//! molecular-dynamics trajectories of a tracked molecule above a surface.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Trajectory`,
//!   layer and run types, exposure tallies) and file I/O for the formats the
//!   pipeline consumes and produces (LAMMPS COM output, layer series files,
//!   CSV reports).
//!
//! - **[`engine`]: The Logic Core.** Implements the analysis proper: the layer
//!   discretizer, the run-length encoder, the hop-transition classifier, and the
//!   residence/rate aggregation, driven by an immutable [`engine::config::AnalysisConfig`].
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into the
//!   two passes of the pipeline: layer generation over a raw trajectory, and
//!   kinetics analysis over a discretized layer series.

pub mod core;
pub mod engine;
pub mod workflows;
