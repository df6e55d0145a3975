//! Output sinks for plot requests.

mod ascii;
mod chart;
mod gnuplot;
mod text;

pub use gnuplot::Gnuplot;

use crate::{error::RenderError, options::Renderer};
use propah::PlotRequest;

pub fn render(
    request: &PlotRequest,
    renderer: Renderer,
    gnuplot: &Gnuplot,
) -> Result<(), RenderError> {
    match renderer {
        Renderer::Gnuplot => gnuplot.render(request),
        Renderer::Chart => chart::render(request),
        Renderer::Ascii => {
            ascii::render(request);
            Ok(())
        }
        Renderer::Csv => text::csv(&mut std::io::stdout().lock(), request),
        Renderer::Json => text::json(&mut std::io::stdout().lock(), request),
    }
}
