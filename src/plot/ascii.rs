//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - yearly medians: `o`
//! - connecting trend line: `-`

use crate::domain::YearMedian;

/// Placeholder shown in place of a chart when no dataset is loaded.
pub const EMPTY_TREND_PLACEHOLDER: &str = "Upload data to see trends.";

/// Render the yearly-median trend as a fixed-size character grid.
///
/// An empty series renders the placeholder line instead of axes; the empty
/// state is not an error.
pub fn render_ascii_trend(series: &[YearMedian], width: usize, height: usize) -> String {
    if series.is_empty() {
        return format!("{EMPTY_TREND_PLACEHOLDER}\n");
    }

    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = year_range(series);
    let (y_min, y_max) = median_range(series);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Trend line first, markers overlay.
    let mut prev: Option<(usize, usize)> = None;
    for point in series {
        let x = map_x(point.year as f64, x_min, x_max, width);
        let y = map_y(point.median_price, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, x, y, '-');
        }
        prev = Some((x, y));
    }

    for point in series {
        let x = map_x(point.year as f64, x_min, x_max, width);
        let y = map_y(point.median_price, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Trend: year=[{}, {}] | median=[{y_min:.2}, {y_max:.2}] RM\n",
        x_min as i32, x_max as i32
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn year_range(series: &[YearMedian]) -> (f64, f64) {
    let min = series.iter().map(|p| p.year).min().unwrap_or(0) as f64;
    let max = series.iter().map(|p| p.year).max().unwrap_or(0) as f64;
    if max > min {
        (min, max)
    } else {
        // A single year still needs a non-degenerate axis.
        (min - 1.0, max + 1.0)
    }
}

fn median_range(series: &[YearMedian]) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in series {
        min_y = min_y.min(p.median_price);
        max_y = max_y.max(p.median_price);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        (min_y, max_y)
    } else {
        (min_y.min(0.0), min_y.max(1.0))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(v: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((v - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((v - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only writes into blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_renders_placeholder() {
        let txt = render_ascii_trend(&[], 40, 10);
        assert_eq!(txt, "Upload data to see trends.\n");
    }

    #[test]
    fn trend_golden_snapshot_small() {
        let series = vec![
            YearMedian { year: 2020, median_price: 100.0 },
            YearMedian { year: 2021, median_price: 110.0 },
        ];

        let txt = render_ascii_trend(&series, 10, 5);
        let expected = concat!(
            "Trend: year=[2020, 2021] | median=[99.50, 110.50] RM\n",
            "        -o\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "o-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_year_series_still_renders() {
        let series = vec![YearMedian { year: 2021, median_price: 250.0 }];
        let txt = render_ascii_trend(&series, 10, 5);
        // One marker, centered on the padded year axis.
        assert!(txt.contains('o'));
        assert!(txt.starts_with("Trend: year=[2020, 2022]"));
    }
}
