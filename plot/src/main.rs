mod error;
mod options;
mod render;

use anyhow::Error as AnyError;
use clap::Parser;
use log::debug;
use options::{Cli, SiteArg};
use propah::{plot_request, LinkParameters, PlotRequest, ProfileMode, Units};
use render::Gnuplot;
use std::{fs::File, io::BufReader, path::Path as FsPath};
use terrain::{
    Flat, GreatCircleSampler, Path, PathSample, PathSampler, Site, SphericalEarth, TerrainError,
};

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();
    env_logger::init();

    let Cli {
        rx: SiteArg(rx),
        tx: SiteArg(tx),
        path,
        flat,
        max_step,
        frequency,
        clearance,
        clutter,
        earth_radius,
        metric,
        normalize,
        fresnel,
        keep,
        gnuplot,
        work_dir,
        out,
        renderer,
        cmd,
    } = cli;

    let mut params = LinkParameters::builder()
        .fresnel_clearance(clearance)
        .clutter(clutter)
        .earth_radius(earth_radius)
        .units(Units::from_metric(metric))
        .normalize(normalize)
        .fresnel_plot(fresnel);
    if let Some(mhz) = frequency {
        params = params.frequency(mhz);
    }
    let params = params.build()?;
    let mode = ProfileMode::from(cmd);

    let request: PlotRequest = match path {
        Some(file) => {
            let path = read_path_file(&file)?;
            let earth = SphericalEarth::new(&path, params.earth_radius_ft);
            plot_request(&Recorded(&path), &earth, &tx, &rx, &params, mode, &out)?
        }
        None => {
            let sampler = GreatCircleSampler::new(Flat(flat), max_step)?;
            let earth = SphericalEarth::new(Flat(flat), params.earth_radius_ft);
            plot_request(&sampler, &earth, &tx, &rx, &params, mode, &out)?
        }
    };
    debug!("{mode} request; output: {}", request.output);

    let gnuplot = Gnuplot::default().program(gnuplot).dir(work_dir).keep(keep);
    render::render(&request, renderer, &gnuplot)?;
    Ok(())
}

fn read_path_file(file: &FsPath) -> Result<Path, AnyError> {
    let samples: Vec<PathSample> = serde_json::from_reader(BufReader::new(File::open(file)?))?;
    Ok(Path::new(samples)?)
}

/// A path sampled ahead of time.
struct Recorded<'a>(&'a Path);

impl PathSampler for Recorded<'_> {
    fn read_path(&self, _from: &Site, _to: &Site) -> Result<Path, TerrainError> {
        Ok(self.0.clone())
    }
}
