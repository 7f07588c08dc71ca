//! Numeric helpers behind the chart panels: axis ranges, histogram bins, a Gaussian
//! kernel density estimate and the viridis colour scale.

use ordered_float::OrderedFloat;
use plotters::style::RGBColor;
use std::f64::consts::PI;
use std::ops::Range;

/// One bar of a histogram, covering `[start, end)` (the last bin also includes `end`).
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

fn finite(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| v.is_finite())
}

/// Smallest and largest finite value, if any.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let min = finite(values).map(OrderedFloat).min()?;
    let max = finite(values).map(OrderedFloat).max()?;
    Some((min.0, max.0))
}

/// Axis range spanning all finite `values`, widened by `padding` times the span on
/// both sides. A flat series gets one unit of room either way.
pub fn value_range(values: &[f64], padding: f64) -> Range<f64> {
    match min_max(values) {
        None => 0.0..1.0,
        Some((min, max)) if max - min < f64::EPSILON => (min - 1.0)..(max + 1.0),
        Some((min, max)) => {
            let pad = (max - min) * padding;
            (min - pad)..(max + pad)
        }
    }
}

/// Bins values with Sturges' rule (`ceil(log2 n) + 1` equal-width bins).
pub fn histogram(values: &[f64]) -> Vec<HistogramBin> {
    let data: Vec<f64> = finite(values).collect();
    let Some((min, max)) = min_max(&data) else {
        return Vec::new();
    };
    if max - min < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: data.len(),
        }];
    }

    let bins = (data.len() as f64).log2().ceil() as usize + 1;
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in &data {
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Sample standard deviation (one degree of freedom).
fn sample_std(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    (data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
}

/// Gaussian kernel density estimate evaluated at `samples` evenly spaced points
/// between the smallest and largest value, using Scott's rule for the bandwidth.
///
/// Returns `(x, density)` pairs; the density integrates to one. Fewer than two
/// distinct values give an empty curve.
pub fn gaussian_kde(values: &[f64], samples: usize) -> Vec<(f64, f64)> {
    let data: Vec<f64> = finite(values).collect();
    if data.len() < 2 || samples < 2 {
        return Vec::new();
    }
    let std = sample_std(&data);
    if std <= 0.0 {
        return Vec::new();
    }
    let n = data.len() as f64;
    let bandwidth = std * n.powf(-0.2);
    let norm = 1.0 / (n * bandwidth * (2.0 * PI).sqrt());

    let Some((min, max)) = min_max(&data) else {
        return Vec::new();
    };
    let step = (max - min) / (samples - 1) as f64;

    (0..samples)
        .map(|i| {
            let x = min + i as f64 * step;
            let density = data
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect()
}

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Maps `value` within `[min, max]` onto the viridis colour scale.
pub fn viridis(value: f64, min: f64, max: f64) -> RGBColor {
    let t = if max - min < f64::EPSILON {
        0.5
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lower as f64;
    let (a, b) = (VIRIDIS[lower], VIRIDIS[lower + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Capitalises the first letter of every word, e.g. "partly cloudy" → "Partly Cloudy".
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
