use crate::error::RenderError;
use log::{info, warn};
use propah::{Axis, AxisRange, PlotRequest, Series};
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::Command,
};

/// Name of the generated gnuplot script.
const SCRIPT: &str = "render.gp";

/// Renders plot requests by writing each series to a data file and
/// running gnuplot on a generated script.
#[derive(Debug, Clone)]
pub struct Gnuplot {
    program: String,
    dir: PathBuf,
    keep: bool,
}

impl Default for Gnuplot {
    fn default() -> Self {
        Self {
            program: "gnuplot".to_owned(),
            dir: PathBuf::from("."),
            keep: false,
        }
    }
}

impl Gnuplot {
    /// Runs `program` instead of `gnuplot`.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Directory for data files, the script and the output (defaults
    /// to the current directory).
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Keep data files and the script after rendering (defaults to
    /// false).
    #[must_use]
    pub fn keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    pub fn render(&self, request: &PlotRequest) -> Result<(), RenderError> {
        let mut written = Vec::with_capacity(request.series.len() + 1);
        for series in &request.series {
            let path = self.dir.join(data_file(series));
            write_series(&path, series)?;
            written.push(path);
        }
        let script = self.dir.join(SCRIPT);
        fs::write(&script, self.script(request))?;
        written.push(script);

        let status = match Command::new(&self.program)
            .arg(SCRIPT)
            .current_dir(&self.dir)
            .status()
        {
            Ok(status) => status,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "{} not found, leaving {} files in {}",
                    self.program,
                    written.len(),
                    self.dir.display()
                );
                return Err(RenderError::Unavailable(self.program.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        if !self.keep {
            for path in &written {
                fs::remove_file(path)?;
            }
        }

        if status.success() {
            info!("wrote {}", self.dir.join(request.output.file_name()).display());
            Ok(())
        } else {
            Err(RenderError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }

    /// Returns the gnuplot script that plots `request`.
    pub fn script(&self, request: &PlotRequest) -> String {
        let ranges = &request.ranges;
        let mut lines = vec![
            "set grid".to_owned(),
            format!("set yrange {}", range(ranges.y)),
        ];
        if let Some(y2) = ranges.y2 {
            lines.push(format!("set y2range {}", range(y2)));
        }
        if let Some(x) = ranges.x {
            lines.push(format!("set xrange {}", range(x)));
        }
        lines.extend([
            "set encoding utf8".to_owned(),
            format!("set term {}", request.output.terminal),
            format!("set title {}", quote(&request.title)),
            format!("set xlabel {}", quote(&request.x_label)),
            format!("set ylabel {}", quote(&request.y_label)),
            format!("set output {}", quote(&request.output.file_name())),
        ]);

        let plots: Vec<String> = request
            .series
            .iter()
            .map(|series| {
                let axes = match series.axis {
                    Axis::Y1 => "",
                    Axis::Y2 => " axes x1y2",
                };
                format!(
                    "{}{axes} title {} with lines",
                    quote(&data_file(series)),
                    quote(&series.title)
                )
            })
            .collect();
        lines.push(format!("plot {}", plots.join(", ")));

        let mut script = lines.join("\n");
        script.push('\n');
        script
    }
}

fn data_file(series: &Series) -> String {
    format!("{}.gp", series.name)
}

fn range(range: AxisRange) -> String {
    format!("[{:.3} to {:.3}]", range.min, range.max)
}

/// Double quotes `text` for gnuplot, which expands `\n` inside double
/// quoted strings.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn write_series(path: &Path, series: &Series) -> Result<(), RenderError> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    write_points(&mut out, &series.points)?;
    out.flush()?;
    Ok(())
}

/// Writes one tab separated `x y` pair per line.
fn write_points(out: &mut impl Write, points: &[(f64, f64)]) -> io::Result<()> {
    for (x, y) in points {
        writeln!(out, "{x:.6}\t{y:.6}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{quote, write_points, Gnuplot};
    use crate::error::RenderError;
    use propah::{plot_request, LinkParameters, PlotRequest, ProfileMode};
    use terrain::{geo::coord, Flat, GreatCircleSampler, Site, SphericalEarth};

    fn request(mode: ProfileMode, params: &LinkParameters, name: &str) -> PlotRequest {
        let rx = Site::new("Base", coord!(x: -71.30, y: 44.28), 30.0);
        let tx = Site::new("Peak", coord!(x: -71.25, y: 44.20), 60.0);
        let sampler = GreatCircleSampler::new(Flat(1200.0), 0.25).unwrap();
        let earth = SphericalEarth::new(Flat(1200.0), params.earth_radius_ft);
        plot_request(&sampler, &earth, &tx, &rx, params, mode, name).unwrap()
    }

    #[test]
    fn test_points() {
        let mut out = Vec::new();
        write_points(&mut out, &[(0.0, 1.5), (0.25, -3.125_000_4)]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0.000000\t1.500000\n0.250000\t-3.125000\n"
        );
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("a \"b\"\nc"), "\"a \\\"b\\\"\\nc\"");
    }

    #[test]
    fn test_height_script() {
        let params = LinkParameters::builder()
            .frequency(900.0)
            .fresnel_plot(true)
            .build()
            .unwrap();
        let request = request(ProfileMode::Height, &params, "link.ps");
        let script = Gnuplot::default().script(&request);
        let lines: Vec<&str> = script.lines().collect();

        assert_eq!(lines[0], "set grid");
        assert!(lines[1].starts_with("set yrange ["));
        assert!(lines[2].starts_with("set y2range ["));
        assert!(lines[3].starts_with("set xrange [-0.500 to "));
        assert!(script.contains("set term postscript enhanced color\n"));
        assert!(script.contains("set output \"link.ps\"\n"));
        assert!(script.contains("\\nWith First Fresnel Zone\"\n"));

        let plot = lines.last().unwrap();
        assert!(plot.starts_with("plot \"profile.gp\" title \"Point-to-Point Profile\" with lines, "));
        assert!(plot.contains("\"curvature.gp\" axes x1y2 title \"Earth's Curvature Contour\""));
        assert!(plot.ends_with("\"fresnel_clearance.gp\" title \"60% of First Fresnel Zone\" with lines"));
    }

    #[test]
    fn test_terrain_script() {
        let params = LinkParameters::default();
        let request = request(ProfileMode::Terrain, &params, "");
        let script = Gnuplot::default().script(&request);
        assert!(!script.contains("y2range"));
        assert!(!script.contains("xrange"));
        assert!(script.contains("set term png\n"));
        assert!(script.contains("set output \"profile.png\"\n"));
        assert!(script.ends_with("plot \"profile.gp\" title \"\" with lines\n"));
    }

    #[test]
    fn test_missing_renderer() {
        let dir = std::env::temp_dir().join(format!("plot-gnuplot-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let params = LinkParameters::default();
        let request = request(ProfileMode::Elevation, &params, "angles.svg");

        let result = Gnuplot::default()
            .program("no-such-gnuplot-binary")
            .dir(&dir)
            .render(&request);
        assert!(matches!(result, Err(RenderError::Unavailable(ref p)) if p == "no-such-gnuplot-binary"));

        // Data stays behind for a manual run, and the request is
        // untouched.
        assert!(dir.join("profile.gp").exists());
        assert!(dir.join("reference.gp").exists());
        assert!(dir.join("render.gp").exists());
        assert_eq!(request.output.file_name(), "angles.svg");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
