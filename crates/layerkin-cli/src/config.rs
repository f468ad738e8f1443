use crate::error::{CliError, Result};
use layerkin::engine::config::{AnalysisConfig, FinalRunPolicy};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Defaults matching the study the pipeline was built for: a methanol
/// molecule (3.7 Å diameter) above a Pt surface, coordinates dumped every
/// 10 steps of a 1 fs integration.
mod defaults {
    pub const MOLECULE_DIAMETER: f64 = 3.7;
    pub const DEC_ORIGIN_Z: f64 = 5.958035;
    pub const INT_ORIGIN_Z: f64 = 6.698035;
    pub const DUMP_FREQ: u32 = 10;
    pub const TIMESTEP_FS: f64 = 1.0;
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    #[serde(default)]
    pub discretization: DiscretizationSection,
    #[serde(default)]
    pub sampling: SamplingSection,
    #[serde(default)]
    pub kinetics: KineticsSection,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct DiscretizationSection {
    pub molecule_diameter: Option<f64>,
    pub dec_origin_z: Option<f64>,
    pub int_origin_z: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SamplingSection {
    pub dump_freq: Option<u32>,
    pub timestep_fs: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct KineticsSection {
    pub final_run_policy: Option<FileFinalRunPolicy>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FileFinalRunPolicy {
    AssumeReverseExit,
    Ignore,
}

impl From<FileFinalRunPolicy> for FinalRunPolicy {
    fn from(p: FileFinalRunPolicy) -> Self {
        match p {
            FileFinalRunPolicy::AssumeReverseExit => FinalRunPolicy::AssumeReverseExit,
            FileFinalRunPolicy::Ignore => FinalRunPolicy::Ignore,
        }
    }
}

/// CLI-level overrides applied on top of the file configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub molecule_diameter: Option<f64>,
    pub dec_origin_z: Option<f64>,
    pub int_origin_z: Option<f64>,
    pub ignore_final_run: bool,
}

impl FileConfig {
    /// Loads a TOML config file; `None` yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No config file given; using built-in defaults.");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::file_parsing(path, anyhow::Error::new(e)))?;
        debug!("Loaded configuration from {:?}.", path);
        Ok(config)
    }

    /// Resolves file values, CLI overrides, and defaults into the immutable
    /// core configuration. Precedence: CLI > file > default.
    pub fn resolve(&self, overrides: &CliOverrides) -> Result<AnalysisConfig> {
        let policy = if overrides.ignore_final_run {
            FinalRunPolicy::Ignore
        } else {
            self.kinetics
                .final_run_policy
                .map(Into::into)
                .unwrap_or_default()
        };

        let config = AnalysisConfig::builder()
            .molecule_diameter(
                overrides
                    .molecule_diameter
                    .or(self.discretization.molecule_diameter)
                    .unwrap_or(defaults::MOLECULE_DIAMETER),
            )
            .origin_dec(
                overrides
                    .dec_origin_z
                    .or(self.discretization.dec_origin_z)
                    .unwrap_or(defaults::DEC_ORIGIN_Z),
            )
            .origin_int(
                overrides
                    .int_origin_z
                    .or(self.discretization.int_origin_z)
                    .unwrap_or(defaults::INT_ORIGIN_Z),
            )
            .dump_freq(self.sampling.dump_freq.unwrap_or(defaults::DUMP_FREQ))
            .timestep_fs(self.sampling.timestep_fs.unwrap_or(defaults::TIMESTEP_FS))
            .final_run_policy(policy)
            .build()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_resolve_to_reference_parameters() {
        let config = FileConfig::default()
            .resolve(&CliOverrides::default())
            .unwrap();
        assert_eq!(config.molecule_diameter, 3.7);
        assert_eq!(config.origin_dec, 5.958035);
        assert_eq!(config.origin_int, 6.698035);
        assert_eq!(config.final_run_policy, FinalRunPolicy::AssumeReverseExit);
        assert!((config.time_unit_ps() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [discretization]
            molecule-diameter = 2.8
            dec-origin-z = 4.0

            [sampling]
            dump-freq = 100

            [kinetics]
            final-run-policy = "ignore"
            "#
        )
        .unwrap();

        let config = FileConfig::load(Some(file.path()))
            .unwrap()
            .resolve(&CliOverrides::default())
            .unwrap();
        assert_eq!(config.molecule_diameter, 2.8);
        assert_eq!(config.origin_dec, 4.0);
        assert_eq!(config.origin_int, 6.698035);
        assert_eq!(config.dump_freq, 100);
        assert_eq!(config.final_run_policy, FinalRunPolicy::Ignore);
    }

    #[test]
    fn cli_overrides_take_precedence_over_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [discretization]
            molecule-diameter = 2.8
            "#
        )
        .unwrap();

        let overrides = CliOverrides {
            molecule_diameter: Some(5.0),
            ignore_final_run: true,
            ..Default::default()
        };
        let config = FileConfig::load(Some(file.path()))
            .unwrap()
            .resolve(&overrides)
            .unwrap();
        assert_eq!(config.molecule_diameter, 5.0);
        assert_eq!(config.final_run_policy, FinalRunPolicy::Ignore);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [discretization]
            molcule-diametre = 2.8
            "#
        )
        .unwrap();

        let result = FileConfig::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
