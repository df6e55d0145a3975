use crate::error::RenderError;
use log::info;
use plotters::{coord::Shift, prelude::*};
use propah::{Axis, AxisRange, PlotRequest};

const SIZE: (u32, u32) = (1280, 760);

const COLORS: [RGBColor; 6] = [
    RGBColor(200, 0, 100),
    RGBColor(34, 139, 34),
    RGBColor(30, 144, 255),
    RGBColor(90, 90, 90),
    RGBColor(255, 140, 0),
    RGBColor(148, 0, 211),
];

/// Draws `request` straight to its output file with plotters.
pub fn render(request: &PlotRequest) -> Result<(), RenderError> {
    let file = request.output.file_name();
    match request.output.extension.as_str() {
        "svg" => draw(SVGBackend::new(&file, SIZE).into_drawing_area(), request)?,
        "png" | "bmp" | "jpg" | "jpeg" => {
            draw(BitMapBackend::new(&file, SIZE).into_drawing_area(), request)?;
        }
        other => return Err(RenderError::Format(other.to_owned())),
    }
    info!("wrote {file}");
    Ok(())
}

fn draw_err<E>(e: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Draw(e.to_string())
}

fn draw<DB>(root: DrawingArea<DB, Shift>, request: &PlotRequest) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(draw_err)?;

    let x = request.ranges.x.unwrap_or_else(|| fit_x(request));
    let y = request.ranges.y;
    let y2 = request.ranges.y2;

    let mut chart = ChartBuilder::on(&root)
        .caption(request.title.replace('\n', " "), ("sans-serif", 22))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .set_label_area_size(LabelAreaPosition::Right, if y2.is_some() { 70 } else { 0 })
        .build_cartesian_2d(x.min..x.max, y.min..y.max)
        .map_err(draw_err)?
        .set_secondary_coord(x.min..x.max, y2.map_or(y.min..y.max, |y2| y2.min..y2.max));

    chart
        .configure_mesh()
        .x_desc(request.x_label.as_str())
        .y_desc(request.y_label.replace('\n', " "))
        .draw()
        .map_err(draw_err)?;
    if y2.is_some() {
        chart.configure_secondary_axes().draw().map_err(draw_err)?;
    }

    for (idx, series) in request.series.iter().enumerate() {
        let color = COLORS[idx % COLORS.len()];
        let line = LineSeries::new(series.points.iter().copied(), &color);
        let anno = match series.axis {
            Axis::Y1 => chart.draw_series(line),
            Axis::Y2 => chart.draw_secondary_series(line),
        }
        .map_err(draw_err)?;
        if !series.title.is_empty() {
            anno.label(series.title.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// x range covering every series, for requests that leave it open.
fn fit_x(request: &PlotRequest) -> AxisRange {
    let (min, max) = request
        .series
        .iter()
        .flat_map(|series| series.points.iter().map(|&(x, _)| x))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), x| {
            (min.min(x), max.max(x))
        });
    if min < max {
        AxisRange::new(min, max)
    } else if min.is_finite() {
        AxisRange::new(min - 0.5, min + 0.5)
    } else {
        AxisRange::new(0.0, 1.0)
    }
}
