//! Launches the external QPROP executable for a single operating point.

use crate::errors::SolverError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A velocity or RPM argument. QPROP accepts either a single value or a `start,end,step` triple
/// which makes it sweep that parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SweepValue {
    Single(f64),
    Range { start: f64, end: f64, step: f64 },
}

impl Display for SweepValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepValue::Single(v) => write!(f, "{}", v),
            SweepValue::Range { start, end, step } => write!(f, "{},{},{}", start, end, step),
        }
    }
}

/// An operating point for a single-point run. QPROP treats a bare `0` as "unspecified" and solves
/// for that quantity, so an explicit zero has to be written as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub velocity: SweepValue,
    pub rpm: SweepValue,

    #[serde(default)]
    pub volt: Option<f64>,
    #[serde(default)]
    pub dbeta: Option<f64>,
    #[serde(default)]
    pub thrust: Option<f64>,
    #[serde(default)]
    pub torque: Option<f64>,
    #[serde(default)]
    pub amps: Option<f64>,
    #[serde(default)]
    pub pele: Option<f64>,
}

const UNSPECIFIED: &str = "0";

fn override_arg(value: Option<f64>) -> String {
    match value {
        None => UNSPECIFIED.to_string(),
        // Debug formatting always keeps a decimal point, so 0.0 stays distinct from "0"
        Some(v) => format!("{:?}", v),
    }
}

impl OperatingPoint {
    pub fn new(velocity: f64, rpm: f64) -> Self {
        OperatingPoint {
            velocity: SweepValue::Single(velocity),
            rpm: SweepValue::Single(rpm),
            volt: None,
            dbeta: None,
            thrust: None,
            torque: None,
            amps: None,
            pele: None,
        }
    }

    /// The positional arguments that follow the prop and motor file names
    pub fn arguments(&self) -> Vec<String> {
        let mut args = vec![self.velocity.to_string(), self.rpm.to_string()];
        args.extend(
            [
                self.volt,
                self.dbeta,
                self.thrust,
                self.torque,
                self.amps,
                self.pele,
            ]
            .into_iter()
            .map(override_arg),
        );
        args
    }
}

pub struct QpropRunner {
    pub qprop_path: PathBuf,
    pub propfile_path: PathBuf,
    pub motorfile_path: PathBuf,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl QpropRunner {
    /// The prop and motor files are expected to live in the same directory, which becomes the
    /// working directory of the solver so that an optional `qcon.def` there is picked up.
    pub fn new<P: Into<PathBuf>>(qprop_path: P, propfile_path: P, motorfile_path: P) -> Self {
        QpropRunner {
            qprop_path: qprop_path.into(),
            propfile_path: propfile_path.into(),
            motorfile_path: motorfile_path.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        match self.propfile_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    pub fn command(&self, point: &OperatingPoint) -> Command {
        let mut cmd = Command::new(&self.qprop_path);
        cmd.arg(file_name(&self.propfile_path))
            .arg(file_name(&self.motorfile_path))
            .args(point.arguments())
            .current_dir(self.working_dir());
        cmd
    }

    /// Runs the solver with its standard output redirected to `output_path`. Standard error is
    /// captured and returned in the error when the solver exits unsuccessfully.
    pub fn run_single_point<P: AsRef<Path>>(
        &self,
        point: &OperatingPoint,
        output_path: P,
    ) -> Result<(), SolverError> {
        let output = File::create(output_path.as_ref())?;
        let mut cmd = self.command(point);
        cmd.stdout(Stdio::from(output)).stderr(Stdio::piped());

        log::info!(
            "running {} in {} with {:?}",
            self.qprop_path.display(),
            self.working_dir().display(),
            point.arguments()
        );

        let result = match cmd.output() {
            Ok(result) => result,
            Err(e) => {
                // Nothing was written, so the empty result file is not kept
                let _ = std::fs::remove_file(output_path.as_ref());
                return Err(SolverError::Launch(e));
            }
        };
        if !result.status.success() {
            return Err(SolverError::ExternalProcess {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            });
        }

        log::debug!("solver output written to {}", output_path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_arguments() {
        let point = OperatingPoint::new(0.0, 4000.0);
        assert_eq!(
            vec!["0", "4000", "0", "0", "0", "0", "0", "0"],
            point.arguments()
        );
    }

    #[test_case(None, "0")]
    #[test_case(Some(0.0), "0.0")]
    #[test_case(Some(11.1), "11.1")]
    #[test_case(Some(-2.0), "-2.0")]
    fn test_override_arg(v: Option<f64>, e: &str) {
        assert_eq!(e, override_arg(v));
    }

    #[test]
    fn test_velocity_sweep() {
        let mut point = OperatingPoint::new(0.0, 4600.0);
        point.velocity = SweepValue::Range {
            start: 0.0,
            end: 25.0,
            step: 1.0,
        };
        point.thrust = Some(5.0);

        let args = point.arguments();
        assert_eq!("0,25,1", args[0]);
        assert_eq!("5.0", args[4]);
    }

    #[test]
    fn test_command_layout() {
        let runner = QpropRunner::new("/opt/qprop/qprop", "/data/run/prop.txt", "/data/run/motor.txt");
        let cmd = runner.command(&OperatingPoint::new(10.0, 5000.0));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!("prop.txt", args[0]);
        assert_eq!("motor.txt", args[1]);
        assert_eq!("10", args[2]);
        assert_eq!(10, args.len());
        assert_eq!(Some(Path::new("/data/run")), cmd.get_current_dir());
    }

    #[test]
    fn test_bare_file_runs_here() {
        let runner = QpropRunner::new("qprop", "prop.txt", "motor.txt");
        assert_eq!(Path::new("."), runner.working_dir());
    }

    #[test]
    fn test_missing_executable() {
        let dir = std::env::temp_dir();
        let runner = QpropRunner::new(
            dir.join("definitely-not-qprop-binary"),
            dir.join("prop.txt"),
            dir.join("motor.txt"),
        );
        let output = dir.join("propeller-rs-missing-solver.txt");
        let result = runner.run_single_point(&OperatingPoint::new(0.0, 1000.0), &output);

        assert!(matches!(result, Err(SolverError::Launch(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_sweep_value_deserialize() {
        let single: SweepValue = serde_json::from_str("12.5").unwrap();
        let range: SweepValue = serde_json::from_str(r#"{"start": 0, "end": 20, "step": 2}"#).unwrap();

        assert_eq!(SweepValue::Single(12.5), single);
        assert_eq!("0,20,2", range.to_string());
    }
}
