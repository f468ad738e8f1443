use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use nalgebra::Point3;
use thiserror::Error;

use crate::core::models::trajectory::{Sample, Trajectory, TrajectoryError};

/// Number of header lines a LAMMPS fix-output file carries before the data.
const HEADER_LINES: usize = 3;
/// Coordinate rows following each timestep line: x, y, z.
const COORD_ROWS: usize = 3;

#[derive(Debug, Error)]
pub enum ComError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ComParseErrorKind },

    #[error("Truncated record at end of file: timestep line without {COORD_ROWS} coordinate rows")]
    Truncated,

    #[error("Invalid trajectory: {0}")]
    Trajectory(#[from] TrajectoryError),
}

#[derive(Debug, Error)]
pub enum ComParseErrorKind {
    #[error("Invalid timestep (value: '{value}')")]
    InvalidTimestep { value: String },
    #[error("Invalid coordinate (value: '{value}')")]
    InvalidCoordinate { value: String },
    #[error("Expected at least {expected} whitespace-separated fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
}

/// Reader for LAMMPS center-of-mass fix output.
///
/// After three header lines, the file holds one four-line block per frame:
/// a line whose first field is the timestep, followed by three rows whose
/// second field carries the x, y, and z center-of-mass components in order.
/// Blank lines are ignored.
pub struct ComFile;

impl ComFile {
    pub fn read_from(reader: &mut impl BufRead) -> Result<Trajectory, ComError> {
        let mut samples = Vec::new();

        let mut pending: Option<(u64, Vec<f64>)> = None;
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if line_num < HEADER_LINES || line.trim().is_empty() {
                continue;
            }
            let line_num = line_num + 1; // 1-based for error reporting

            match pending.take() {
                None => {
                    let timestep = Self::parse_timestep(&line, line_num)?;
                    pending = Some((timestep, Vec::with_capacity(COORD_ROWS)));
                }
                Some((timestep, mut coords)) => {
                    coords.push(Self::parse_coordinate(&line, line_num)?);
                    if coords.len() == COORD_ROWS {
                        samples.push(Sample::new(
                            timestep,
                            Point3::new(coords[0], coords[1], coords[2]),
                        ));
                    } else {
                        pending = Some((timestep, coords));
                    }
                }
            }
        }

        if pending.is_some() {
            return Err(ComError::Truncated);
        }

        Ok(Trajectory::from_samples(samples)?)
    }

    pub fn read_from_path(path: &Path) -> Result<Trajectory, ComError> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    fn parse_timestep(line: &str, line_num: usize) -> Result<u64, ComError> {
        let field = line
            .split_whitespace()
            .next()
            .ok_or(ComError::Parse {
                line: line_num,
                kind: ComParseErrorKind::TooFewFields {
                    expected: 1,
                    found: 0,
                },
            })?;
        field.parse::<u64>().map_err(|_| ComError::Parse {
            line: line_num,
            kind: ComParseErrorKind::InvalidTimestep {
                value: field.to_string(),
            },
        })
    }

    fn parse_coordinate(line: &str, line_num: usize) -> Result<f64, ComError> {
        let mut fields = line.split_whitespace();
        let found = fields.clone().count();
        let field = fields.nth(1).ok_or(ComError::Parse {
            line: line_num,
            kind: ComParseErrorKind::TooFewFields { expected: 2, found },
        })?;
        field.parse::<f64>().map_err(|_| ComError::Parse {
            line: line_num,
            kind: ComParseErrorKind::InvalidCoordinate {
                value: field.to_string(),
            },
        })
    }
}
