use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a terminal-speed sweep CSV as a line plot or heatmap"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/terminal_speed.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Debug, Clone)]
struct Cell {
    slope_deg: f64,
    crr: f64,
    /// NaN marks a no-root cell.
    speed_m_s: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cells = read_cells(&cli.input)?;
    if cells.is_empty() {
        return Err(anyhow::anyhow!("No rows in the provided CSV"));
    }

    let slopes = distinct_sorted(cells.iter().map(|c| c.slope_deg));
    let crrs = distinct_sorted(cells.iter().map(|c| c.crr));

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    if crrs.len() == 1 {
        let points: Vec<(f64, f64)> = cells.iter().map(|c| (c.slope_deg, c.speed_m_s)).collect();
        draw_line(
            &root,
            &points,
            "Terminal Rover Speed vs Terrain Slope",
            "Terrain Slope Angle [deg]",
        )?;
    } else if slopes.len() == 1 {
        let points: Vec<(f64, f64)> = cells.iter().map(|c| (c.crr, c.speed_m_s)).collect();
        draw_line(
            &root,
            &points,
            "Terminal Rover Speed vs Rolling Resistance",
            "Rolling Resistance Coefficient Crr [-]",
        )?;
    } else {
        draw_heatmap(&root, &cells, &slopes, &crrs, cli.width)?;
    }

    root.present()?;
    Ok(())
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

fn draw_line(root: &Area<'_>, points: &[(f64, f64)], caption: &str, x_desc: &str) -> anyhow::Result<()> {
    let finite: Vec<(f64, f64)> = points.iter().copied().filter(|p| p.1.is_finite()).collect();
    if finite.is_empty() {
        return Err(anyhow::anyhow!("No solvable cells in the provided CSV"));
    }
    let x_min = finite.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = finite.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_max = finite.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(caption, caption_font)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.05)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Terminal Rover Speed [m/s]")
        .label_style(label_font)
        .draw()?;

    // break the polyline at no-root gaps instead of bridging them
    let mut segment: Vec<(f64, f64)> = Vec::new();
    for &(x, y) in points {
        if y.is_finite() {
            segment.push((x, y));
        } else if segment.len() > 1 {
            chart.draw_series(LineSeries::new(segment.drain(..), BLUE.stroke_width(2)))?;
        } else {
            segment.clear();
        }
    }
    if segment.len() > 1 {
        chart.draw_series(LineSeries::new(segment, BLUE.stroke_width(2)))?;
    }

    Ok(())
}

fn draw_heatmap(
    root: &Area<'_>,
    cells: &[Cell],
    slopes: &[f64],
    crrs: &[f64],
    width: u32,
) -> anyhow::Result<()> {
    let grid = build_grid(cells, slopes, crrs);
    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;
    for row in &grid {
        for &v in row {
            if v.is_finite() {
                min_value = min_value.min(v);
                max_value = max_value.max(v);
            }
        }
    }
    if !min_value.is_finite() {
        return Err(anyhow::anyhow!("No solvable cells in the provided CSV"));
    }
    if max_value <= min_value {
        max_value = min_value + 1e-9;
    }

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let legend_width = 140i32;
    let (plot_area, legend_area) = root.split_horizontally((width as i32 - legend_width).max(200));

    let x_span = (crrs[0], crrs[crrs.len() - 1]);
    let y_span = (slopes[0], slopes[slopes.len() - 1]);

    {
        let mut chart = ChartBuilder::on(&plot_area)
            .margin(20)
            .caption("Terminal Rover Speed vs Slope and Rolling Resistance", caption_font)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(x_span.0..x_span.1, y_span.0..y_span.1)?;

        chart
            .configure_mesh()
            .x_desc("Rolling Resistance Coefficient Crr [-]")
            .y_desc("Terrain Slope Angle [deg]")
            .label_style(label_font.clone())
            .x_labels(6)
            .y_labels(6)
            .draw()?;

        for (slope_idx, row) in grid.iter().enumerate() {
            let (y0, y1) = cell_bounds(slopes, slope_idx);
            for (crr_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let (x0, x1) = cell_bounds(crrs, crr_idx);
                let t = (value - min_value) / (max_value - min_value);
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x0, y0), (x1, y1)],
                    jet_color(t).filled(),
                )))?;
            }
        }
    }

    {
        let mut chart = ChartBuilder::on(&legend_area)
            .margin_left(20)
            .margin_right(20)
            .margin_top(30)
            .margin_bottom(30)
            .x_label_area_size(0)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..1.0, min_value..max_value)?;

        for i in 0..300 {
            let t0 = i as f64 / 300.0;
            let t1 = (i + 1) as f64 / 300.0;
            let v0 = min_value + (max_value - min_value) * t0;
            let v1 = min_value + (max_value - min_value) * t1;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(0.0, v0), (1.0, v1)],
                jet_color(t0).filled(),
            )))?;
        }

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(0)
            .y_labels(6)
            .y_desc("Terminal Rover Speed [m/s]")
            .y_label_style(label_font.clone())
            .axis_desc_style(label_font)
            .y_label_formatter(&|v| format!("{v:.3}"))
            .draw()?;
    }

    Ok(())
}

fn read_cells(path: &str) -> anyhow::Result<Vec<Cell>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let slope_idx = column(&headers, "terrain_angle_deg")?;
    let crr_idx = column(&headers, "crr")?;
    let speed_idx = column(&headers, "speed_m_s")?;

    let mut cells = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let slope_deg: f64 = r.get(slope_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let crr: f64 = r.get(crr_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let speed_m_s: f64 = r.get(speed_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if slope_deg.is_finite() && crr.is_finite() {
            cells.push(Cell {
                slope_deg,
                crr,
                speed_m_s,
            });
        }
    }
    Ok(cells)
}

fn column(headers: &csv::StringRecord, name: &str) -> anyhow::Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());
    v.dedup();
    v
}

fn build_grid(cells: &[Cell], slopes: &[f64], crrs: &[f64]) -> Vec<Vec<f64>> {
    let mut grid = vec![vec![f64::NAN; crrs.len()]; slopes.len()];
    for cell in cells {
        let slope_idx = nearest_index(slopes, cell.slope_deg);
        let crr_idx = nearest_index(crrs, cell.crr);
        grid[slope_idx][crr_idx] = cell.speed_m_s;
    }
    grid
}

fn nearest_index(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, &v) in values.iter().enumerate() {
        let dist = (v - target).abs();
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    best
}

/// Edges of the cell around sample `idx`: midpoints to the neighbours,
/// extrapolated half-steps at the borders.
fn cell_bounds(values: &[f64], idx: usize) -> (f64, f64) {
    let lo = if idx == 0 {
        values[0] - 0.5 * (values.get(1).copied().unwrap_or(values[0] + 1.0) - values[0])
    } else {
        0.5 * (values[idx - 1] + values[idx])
    };
    let hi = if idx + 1 == values.len() {
        values[idx] + 0.5 * (values[idx] - values.get(idx.wrapping_sub(1)).copied().unwrap_or(values[idx] - 1.0))
    } else {
        0.5 * (values[idx] + values[idx + 1])
    };
    (lo, hi)
}

fn jet_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let r = (1.5 - (4.0 * t - 3.0).abs()).clamp(0.0, 1.0);
    let g = (1.5 - (4.0 * t - 2.0).abs()).clamp(0.0, 1.0);
    let b = (1.5 - (4.0 * t - 1.0).abs()).clamp(0.0, 1.0);
    RGBColor((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}
