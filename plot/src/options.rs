use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand, ValueEnum};
use propah::ProfileMode;
use std::{path::PathBuf, str::FromStr};
use terrain::{constants::EARTH_RADIUS_FT, geo::geometry::Coord, Site};

/// Plot terrain, elevation angle and line of sight height profiles of
/// a radio path.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Receive site "name,lat,lon,alt", where 'alt' is feet above
    /// ground.
    #[arg(long)]
    pub rx: SiteArg,

    /// Transmit site "name,lat,lon,alt", where 'alt' is feet above
    /// ground.
    #[arg(long)]
    pub tx: SiteArg,

    /// JSON file of path samples from rx to tx. Each sample is an
    /// object with 'distance_mi', 'elevation_ft', 'lat' and 'lon'.
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Terrain elevation, in feet, when no path file is given.
    #[arg(long, default_value_t = 0.0)]
    pub flat: f64,

    /// Maximum path incremental step size, in miles.
    #[arg(short, long, default_value_t = 0.05)]
    pub max_step: f64,

    /// Transmitter frequency, in MHz.
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// Fraction of the first Fresnel zone that must be clear.
    #[arg(long, default_value_t = 0.6)]
    pub clearance: f64,

    /// Ground clutter height, in feet.
    #[arg(long, default_value_t = 0.0)]
    pub clutter: f64,

    /// Earth radius, in feet.
    #[arg(long, default_value_t = EARTH_RADIUS_FT)]
    pub earth_radius: f64,

    /// Plot in meters and kilometers.
    #[arg(long, default_value_t = false)]
    pub metric: bool,

    /// Level the line of sight in height profiles.
    #[arg(short, long, default_value_t = false)]
    pub normalize: bool,

    /// Plot the first Fresnel zone in height profiles.
    #[arg(long, default_value_t = false)]
    pub fresnel: bool,

    /// Keep gnuplot's intermediate files.
    #[arg(long, default_value_t = false)]
    pub keep: bool,

    /// gnuplot executable.
    #[arg(long, default_value = "gnuplot")]
    pub gnuplot: String,

    /// Directory for gnuplot's intermediate files and the output.
    #[arg(long, default_value = ".")]
    pub work_dir: PathBuf,

    /// Output file; its extension selects the output format.
    #[arg(short, long, default_value = "")]
    pub out: String,

    #[arg(short, long, value_enum, default_value_t = Renderer::Gnuplot)]
    pub renderer: Renderer,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Clone, Debug)]
pub struct SiteArg(pub Site);

impl FromStr for SiteArg {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let mut parts = s.rsplitn(4, ',');
        let (Some(alt_str), Some(lon_str), Some(lat_str), Some(name)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(anyhow!("not a valid name,lat,lon,alt"));
        };
        let lat = f64::from_str(lat_str.trim())?;
        let lon = f64::from_str(lon_str.trim())?;
        let alt = f64::from_str(alt_str.trim())?;
        Ok(Self(Site::new(name.trim(), Coord { y: lat, x: lon }, alt)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Renderer {
    /// Write series and a script, then run gnuplot.
    Gnuplot,

    /// Draw the chart directly (svg, png, bmp or jpg).
    Chart,

    /// Plot to terminal.
    Ascii,

    /// Print series to stdout.
    Csv,

    /// Print the whole plot request to stdout.
    Json,
}

#[derive(Debug, Subcommand, Clone, Copy)]
pub enum Command {
    /// Ground elevation along the path.
    Terrain,

    /// Elevation angles from the receiver along the path.
    Elevation,

    /// Terrain height referenced to the line of sight.
    Height,
}

impl From<Command> for ProfileMode {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Terrain => Self::Terrain,
            Command::Elevation => Self::Elevation,
            Command::Height => Self::Height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SiteArg;
    use std::str::FromStr;

    #[test]
    fn test_parse_site() {
        let SiteArg(site) = SiteArg::from_str("Mt. Washington, 44.2705,-71.3033,60").unwrap();
        assert_eq!(site.name, "Mt. Washington");
        assert_eq!(site.coord.y, 44.2705);
        assert_eq!(site.coord.x, -71.3033);
        assert_eq!(site.alt_ft, 60.0);

        // Names may contain commas.
        let SiteArg(site) = SiteArg::from_str("Tower 3, north,1,2,3").unwrap();
        assert_eq!(site.name, "Tower 3, north");
    }

    #[test]
    fn test_reject_site() {
        assert!(SiteArg::from_str("1,2,3").is_err());
        assert!(SiteArg::from_str("rx,north,2,3").is_err());
    }
}
