use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for {parameter}: {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },
}

/// How the final run of a trajectory is classified.
///
/// The last observed run has no outgoing boundary; whether it contributes an
/// event at all is a modeling choice, not a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalRunPolicy {
    /// Count the final run as a reverse exit out of its layer, on the
    /// assumption that the molecule eventually leaves toward the bulk.
    #[default]
    AssumeReverseExit,
    /// Drop the final run from the residence and hop-event tables. Its
    /// samples still count toward exposure.
    Ignore,
}

/// Immutable physical and sampling parameters for one analysis pass.
///
/// Lengths are in the coordinate units of the trajectory (Å for LAMMPS real
/// units); times are derived from the dump frequency and integration
/// timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Reference z height where decimal layer counting starts.
    pub origin_dec: f64,
    /// Reference z height where integer layer counting starts. Sits above
    /// `origin_dec` so the thin first sub-layer folds into integer layer 1.
    pub origin_int: f64,
    /// Diameter of the tracked molecule; one integer layer width.
    pub molecule_diameter: f64,
    /// Coordinate dump interval, in integration steps.
    pub dump_freq: u32,
    /// Integration timestep in femtoseconds.
    pub timestep_fs: f64,
    pub final_run_policy: FinalRunPolicy,
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Decimal layer width: one tenth of a molecule diameter.
    pub fn width_dec(&self) -> f64 {
        self.molecule_diameter * 0.1
    }

    /// Integer layer width: one molecule diameter.
    pub fn width_int(&self) -> f64 {
        self.molecule_diameter
    }

    /// Duration of one sample interval in picoseconds; converts exposure
    /// counts into physical time for the rate constants.
    pub fn time_unit_ps(&self) -> f64 {
        f64::from(self.dump_freq) * self.timestep_fs / 1000.0
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    origin_dec: Option<f64>,
    origin_int: Option<f64>,
    molecule_diameter: Option<f64>,
    dump_freq: Option<u32>,
    timestep_fs: Option<f64>,
    final_run_policy: Option<FinalRunPolicy>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin_dec(mut self, z: f64) -> Self {
        self.origin_dec = Some(z);
        self
    }
    pub fn origin_int(mut self, z: f64) -> Self {
        self.origin_int = Some(z);
        self
    }
    pub fn molecule_diameter(mut self, diameter: f64) -> Self {
        self.molecule_diameter = Some(diameter);
        self
    }
    pub fn dump_freq(mut self, steps: u32) -> Self {
        self.dump_freq = Some(steps);
        self
    }
    pub fn timestep_fs(mut self, fs: f64) -> Self {
        self.timestep_fs = Some(fs);
        self
    }
    pub fn final_run_policy(mut self, policy: FinalRunPolicy) -> Self {
        self.final_run_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let config = AnalysisConfig {
            origin_dec: self
                .origin_dec
                .ok_or(ConfigError::MissingParameter("origin_dec"))?,
            origin_int: self
                .origin_int
                .ok_or(ConfigError::MissingParameter("origin_int"))?,
            molecule_diameter: self
                .molecule_diameter
                .ok_or(ConfigError::MissingParameter("molecule_diameter"))?,
            dump_freq: self
                .dump_freq
                .ok_or(ConfigError::MissingParameter("dump_freq"))?,
            timestep_fs: self
                .timestep_fs
                .ok_or(ConfigError::MissingParameter("timestep_fs"))?,
            final_run_policy: self.final_run_policy.unwrap_or_default(),
        };

        if !config.molecule_diameter.is_finite() || config.molecule_diameter <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "molecule_diameter",
                message: format!("must be a positive length, got {}", config.molecule_diameter),
            });
        }
        if !config.origin_dec.is_finite() || !config.origin_int.is_finite() {
            return Err(ConfigError::InvalidParameter {
                parameter: "origin",
                message: "origin heights must be finite".to_string(),
            });
        }
        if config.dump_freq == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "dump_freq",
                message: "must be at least 1 step".to_string(),
            });
        }
        if !config.timestep_fs.is_finite() || config.timestep_fs <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "timestep_fs",
                message: format!("must be a positive duration, got {}", config.timestep_fs),
            });
        }

        Ok(config)
    }
}
