//! Writes the fixed-format propeller description read by the QPROP solver.

use crate::blade::ResampledBladeGeometry;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Section polar constants and the geometry scale factors written in the header of a prop file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AeroCoefficients {
    pub cl0: f64,
    pub cl_a: f64,
    pub cl_min: f64,
    pub cl_max: f64,
    pub cd0: f64,
    pub cd2u: f64,
    pub cd2l: f64,
    pub clcd0: f64,
    pub re_ref: f64,
    pub re_exp: f64,

    /// Multipliers applied by the solver to the radius, chord, and twist columns
    pub r_fac: f64,
    pub c_fac: f64,
    pub b_fac: f64,

    /// Offsets added by the solver to the radius, chord, and twist columns
    pub r_add: f64,
    pub c_add: f64,
    pub b_add: f64,
}

impl Default for AeroCoefficients {
    fn default() -> Self {
        AeroCoefficients {
            cl0: 0.5,
            cl_a: 5.8,
            cl_min: -0.3,
            cl_max: 1.2,
            cd0: 0.028,
            cd2u: 0.05,
            cd2l: 0.02,
            clcd0: 0.5,
            re_ref: 70000.0,
            re_exp: -0.7,
            r_fac: 1.0,
            c_fac: 1.0,
            b_fac: 1.0,
            r_add: 0.0,
            c_add: 0.0,
            b_add: 0.0,
        }
    }
}

pub fn write_prop_file<W: Write>(
    writer: &mut W,
    name: &str,
    blades: u32,
    blade: &ResampledBladeGeometry,
    aero: &AeroCoefficients,
) -> std::io::Result<()> {
    writeln!(writer, "{}", name)?;
    writeln!(writer)?;
    writeln!(writer, " {}  {}   ! Nblades  [ R ]", blades, blade.radius())?;
    writeln!(writer)?;
    writeln!(writer, " {}  {}   ! CL0     CL_a", aero.cl0, aero.cl_a)?;
    writeln!(writer, " {}  {}   ! CLmin   CLmax", aero.cl_min, aero.cl_max)?;
    writeln!(writer)?;
    writeln!(
        writer,
        " {}  {}  {}  {}   ! CD0    CD2u   CD2l   CLCD0",
        aero.cd0, aero.cd2u, aero.cd2l, aero.clcd0
    )?;
    writeln!(writer, " {}  {}   ! REref  REexp", aero.re_ref, aero.re_exp)?;
    writeln!(writer)?;
    writeln!(
        writer,
        " {}  {}  {}   ! Rfac   Cfac   Bfac",
        aero.r_fac, aero.c_fac, aero.b_fac
    )?;
    writeln!(
        writer,
        " {}  {}  {}   ! Radd   Cadd   Badd",
        aero.r_add, aero.c_add, aero.b_add
    )?;
    writeln!(writer)?;
    writeln!(writer, "#  r    chord    beta")?;

    for s in blade.stations() {
        writeln!(writer, " {:.2}  {:.2}  {:.2}", s.radius, s.chord, s.twist)?;
    }

    writer.flush()
}

pub fn save_prop_file<P: AsRef<Path>>(
    path: P,
    name: &str,
    blades: u32,
    blade: &ResampledBladeGeometry,
    aero: &AeroCoefficients,
) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_prop_file(&mut writer, name, blades, blade, aero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_blade() -> ResampledBladeGeometry {
        ResampledBladeGeometry {
            diameter: 20.0,
            common_station: vec![1.0, 4.0, 7.0],
            normalized_station: vec![0.1, 0.4, 0.7],
            chord: vec![1.234, 1.5, 0.999],
            twist: vec![40.0, 22.456, 15.0],
            thickness: None,
            sweep: None,
            vertical_offset: None,
        }
    }

    fn render(aero: &AeroCoefficients) -> String {
        let mut buffer = Vec::new();
        write_prop_file(&mut buffer, "20x10E", 2, &sample_blade(), aero).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header() {
        let text = render(&AeroCoefficients::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!("20x10E", lines[0]);
        assert_eq!(" 2  10   ! Nblades  [ R ]", lines[2]);
        assert_eq!(" 0.5  5.8   ! CL0     CL_a", lines[4]);
        assert_eq!(" -0.3  1.2   ! CLmin   CLmax", lines[5]);
        assert_eq!(" 0.028  0.05  0.02  0.5   ! CD0    CD2u   CD2l   CLCD0", lines[7]);
        assert_eq!(" 70000  -0.7   ! REref  REexp", lines[8]);
        assert_eq!(" 1  1  1   ! Rfac   Cfac   Bfac", lines[10]);
        assert_eq!(" 0  0  0   ! Radd   Cadd   Badd", lines[11]);
    }

    #[test]
    fn test_station_rows() {
        let text = render(&AeroCoefficients::default());
        let rows: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with('#'))
            .skip(1)
            .collect();

        assert_eq!(
            vec![" 1.00  1.23  40.00", " 4.00  1.50  22.46", " 7.00  1.00  15.00"],
            rows
        );
    }

    #[test]
    fn test_aero_deserialize_partial() {
        let aero: AeroCoefficients = serde_json::from_str(r#"{"cl0": 0.3}"#).unwrap();
        assert_eq!(0.3, aero.cl0);
        assert_eq!(5.8, aero.cl_a);
    }
}
