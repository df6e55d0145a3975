use crate::error::RenderError;
use propah::PlotRequest;
use std::io::Write;

/// Writes every series point as a `series,x,y` row.
pub fn csv(out: &mut impl Write, request: &PlotRequest) -> Result<(), RenderError> {
    writeln!(out, "series,x,y")?;
    for series in &request.series {
        for (x, y) in &series.points {
            writeln!(out, "{},{x},{y}", series.name)?;
        }
    }
    Ok(())
}

pub fn json(out: &mut impl Write, request: &PlotRequest) -> Result<(), RenderError> {
    serde_json::to_writer_pretty(&mut *out, request)?;
    writeln!(out)?;
    Ok(())
}
