use propah::{Axis, PlotRequest};
use textplots::{Chart, Plot, Shape};

/// Plots the primary axis series of `request` to the terminal.
pub fn render(request: &PlotRequest) {
    let data: Vec<(&str, Vec<(f32, f32)>)> = request
        .series
        .iter()
        .filter(|series| series.axis == Axis::Y1 && !series.points.is_empty())
        .map(|series| {
            #[allow(clippy::cast_possible_truncation)]
            let points = series
                .points
                .iter()
                .map(|&(x, y)| (x as f32, y as f32))
                .collect();
            (series.title.as_str(), points)
        })
        .collect();
    let shapes: Vec<Shape> = data.iter().map(|(_, points)| Shape::Lines(points)).collect();

    let (xmin, xmax) = data
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(x, _)| x))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), x| {
            (min.min(x), max.max(x))
        });
    if !(xmin < xmax) {
        return;
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut chart = Chart::new_with_y_range(
        300,
        150,
        xmin,
        xmax,
        request.ranges.y.min as f32,
        request.ranges.y.max as f32,
    );
    println!("{}", request.title);
    let mut plot = &mut chart;
    for shape in &shapes {
        plot = plot.lineplot(shape);
    }
    plot.display();
    for (title, _) in data.iter().filter(|(title, _)| !title.is_empty()) {
        println!("  {title}");
    }
    println!("{}", request.x_label);
}
