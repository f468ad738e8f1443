use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error(
        "Timesteps must be strictly increasing: sample {index} has timestep {found} after {previous}"
    )]
    NonMonotonicTimestep {
        index: usize,
        previous: u64,
        found: u64,
    },

    #[error("Non-finite coordinate at sample {index} (timestep {timestep})")]
    NonFiniteCoordinate { index: usize, timestep: u64 },
}

/// A single recorded frame: the dump timestep and the center-of-mass position
/// of the tracked molecule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestep: u64,
    pub position: Point3<f64>,
}

impl Sample {
    pub fn new(timestep: u64, position: Point3<f64>) -> Self {
        Self { timestep, position }
    }

    /// Height above the surface plane; the coordinate the layer binning acts on.
    #[inline]
    pub fn z(&self) -> f64 {
        self.position.z
    }
}

/// An ordered sequence of samples for one molecule. Insertion order is time
/// order and is load-bearing: it defines adjacency for transition detection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    /// Builds a trajectory, rejecting non-monotonic timesteps and non-finite
    /// coordinates. An empty sample list is a valid (empty) trajectory.
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self, TrajectoryError> {
        for (index, sample) in samples.iter().enumerate() {
            if !(sample.position.x.is_finite()
                && sample.position.y.is_finite()
                && sample.position.z.is_finite())
            {
                return Err(TrajectoryError::NonFiniteCoordinate {
                    index,
                    timestep: sample.timestep,
                });
            }
            if index > 0 {
                let previous = samples[index - 1].timestep;
                if sample.timestep <= previous {
                    return Err(TrajectoryError::NonMonotonicTimestep {
                        index,
                        previous,
                        found: sample.timestep,
                    });
                }
            }
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}
