//! Grid-of-histograms figure.
//!
//! One PNG per sweep: a three-line title block above a rows × cols grid of
//! log-decade histograms, one panel per bet fraction in grid order. Cells
//! past the last fraction are left blank. The x axis is drawn in log10
//! space so every power-of-ten edge gets its own `1eN` tick.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use super::histogram::{self, Histogram};
use super::stats::sci;
use crate::config::{FigureConfig, SimConfig};
use crate::types::{Batch, ResultSet, SimError};

/// Histogram bar fill.
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Render the figure for one sweep to `path`.
pub fn render(results: &ResultSet, config: &SimConfig, path: &Path) -> Result<(), SimError> {
    draw_figure(results, config, path)
        .map_err(|e| SimError::Render(format!("{}: {e}", path.display())))
}

/// Title block lines, top to bottom.
pub fn title_lines(results: &ResultSet, config: &SimConfig) -> [String; 3] {
    [
        "Investment Simulation Results".to_string(),
        format!(
            "Flips per Experiment: {} | Number of Experiments: {} | Initial Amount: ${:.2}",
            results.num_flips,
            group_thousands(config.num_experiments),
            config.initial_amount,
        ),
        format!(
            "Win Rate: {:.2} | Lose Rate: {:.2}",
            config.rates.win, config.rates.lose
        ),
    ]
}

/// `100000` → `100,000`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn draw_figure(results: &ResultSet, config: &SimConfig, path: &Path) -> Result<(), Box<dyn Error>> {
    let fig = &config.figure;
    let (width, height) = fig.pixel_size();
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let title_size = fig.points(20.0);
    let title_height = (title_size * 4.2) as u32;
    let (title_area, body) = root.split_vertically(title_height);

    let title_style = TextStyle::from(("sans-serif", title_size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in title_lines(results, config).into_iter().enumerate() {
        let y = (title_size * 0.4 + i as f64 * title_size * 1.25) as i32;
        title_area.draw(&Text::new(line, (width as i32 / 2, y), title_style.clone()))?;
    }

    let panels = body.split_evenly((fig.rows, fig.cols));
    for (batch, panel) in results.iter().zip(panels.iter()) {
        let hist = histogram::build(&batch.outcomes, &config.clamp);
        draw_panel(panel, batch, &hist, fig)?;
    }

    root.present()?;
    debug!(path = %path.display(), width, height, panels = results.len(), "Figure written");
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    batch: &Batch,
    hist: &Histogram,
    fig: &FigureConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let x_min = hist.exponents.first().copied().unwrap_or(0) as f64;
    let x_max = hist.exponents.last().copied().unwrap_or(1) as f64;
    let y_max = (hist.peak() * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(batch.label(), ("sans-serif", fig.points(16.0)))
        .margin(fig.points(6.0) as u32)
        .x_label_area_size(fig.points(56.0) as u32)
        .y_label_area_size(fig.points(44.0) as u32)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    let ticks = hist.tick_labels();
    let first = hist.exponents.first().copied().unwrap_or(0);
    let tick_label = |x: &f64| axis_label(&ticks, first, *x);

    chart
        .configure_mesh()
        .x_labels(hist.exponents.len())
        .x_label_formatter(&tick_label)
        .x_desc("Final Amount (Log Scale)")
        .y_desc("Percentage of Experiments (%)")
        .label_style(("sans-serif", fig.points(10.0)))
        .x_label_style(
            ("sans-serif", fig.points(10.0))
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .axis_desc_style(("sans-serif", fig.points(12.0)))
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.08))
        .draw()?;

    let bars = hist
        .percentages
        .iter()
        .zip(hist.exponents.windows(2))
        .map(|(pct, w)| ([(w[0] as f64, 0.0), (w[1] as f64, *pct)], *pct));

    chart.draw_series(
        bars.clone()
            .map(|(corners, _)| Rectangle::new(corners, BAR_COLOR.filled())),
    )?;
    chart.draw_series(
        bars.filter(|(_, pct)| *pct > 0.0)
            .map(|(corners, _)| Rectangle::new(corners, BLACK.stroke_width(1))),
    )?;

    let text_size = fig.points(12.0);
    let pad = fig.points(8.0) as i32;
    let line_height = (text_size * 1.2) as i32;
    let note_style = TextStyle::from(("sans-serif", text_size).into_font())
        .pos(Pos::new(HPos::Right, VPos::Top));
    let notes = [
        format!("Mean: {}", sci(hist.mean)),
        format!("Median: {}", sci(hist.median)),
    ];
    chart.draw_series(notes.into_iter().enumerate().map(|(i, line)| {
        EmptyElement::at((x_max, y_max))
            + Text::new(line, (-pad, pad + i as i32 * line_height), note_style.clone())
    }))?;

    Ok(())
}

/// Label for an x position in exponent space; blank off the edge list.
fn axis_label(ticks: &[String], first_exponent: i32, x: f64) -> String {
    usize::try_from(x.round() as i32 - first_exponent)
        .ok()
        .and_then(|i| ticks.get(i).cloned())
        .unwrap_or_default()
}
