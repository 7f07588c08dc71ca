//! The nine dashboard panels. Every function draws onto one cell of the 3x3 grid.

use crate::render::error::RenderError;
use crate::render::stats::{gaussian_kde, histogram, min_max, title_case, value_range, viridis};
use crate::table::daily_stats::DailyStats;
use crate::types::snapshot::WeatherSnapshot;
use chrono::{DateTime, FixedOffset, TimeDelta};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;

pub(crate) type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const TEMPERATURE: RGBColor = RGBColor(0xFF, 0x6B, 0x6B);
const FEELS_LIKE: RGBColor = RGBColor(0x4E, 0xCD, 0xC4);
const HUMIDITY: RGBColor = RGBColor(0x45, 0xB7, 0xD1);
const WIND: RGBColor = RGBColor(0x96, 0xCE, 0xB4);
const PRESSURE: RGBColor = RGBColor(0xFF, 0xEA, 0xA7);
const DAILY_MEAN: RGBColor = RGBColor(0xD6, 0x27, 0x28);
const INFO_BOX: RGBColor = RGBColor(0xAD, 0xD8, 0xE6);
const PIE_COLORS: [RGBColor; 5] = [TEMPERATURE, FEELS_LIKE, HUMIDITY, WIND, PRESSURE];

const FONT: &str = "sans-serif";

fn caption_style() -> TextStyle<'static> {
    (FONT, 26).into_font().style(FontStyle::Bold).into()
}

fn label_style() -> TextStyle<'static> {
    (FONT, 18).into()
}

fn desc_style() -> TextStyle<'static> {
    (FONT, 20).into()
}

fn time_range(times: &[DateTime<FixedOffset>]) -> Range<DateTime<FixedOffset>> {
    let epoch = DateTime::UNIX_EPOCH.fixed_offset();
    match (times.first(), times.last()) {
        (Some(first), Some(last)) if first < last => *first..*last,
        (Some(first), _) => *first..(*first + TimeDelta::hours(3)),
        _ => epoch..(epoch + TimeDelta::hours(3)),
    }
}

fn time_label(time: &DateTime<FixedOffset>) -> String {
    time.format("%m-%d %H:%M").to_string()
}

/// Text box with the current snapshot.
pub(crate) fn current_conditions(
    area: &Panel,
    current: &WeatherSnapshot,
) -> Result<(), RenderError> {
    let (width, height) = area.dim_in_pixel();
    area.draw(&Rectangle::new(
        [(20, 20), (width as i32 - 20, height as i32 - 20)],
        INFO_BOX.mix(0.5).filled(),
    ))?;

    let lines = [
        "CURRENT CONDITIONS".to_string(),
        String::new(),
        format!("Temperature: {:.1}°C", current.temperature),
        format!("Feels like: {:.1}°C", current.feels_like),
        format!("Humidity: {}%", current.humidity),
        format!("Pressure: {} hPa", current.pressure),
        format!("Wind Speed: {:.1} m/s", current.wind_speed),
        format!("Condition: {}", current.condition),
        format!("Description: {}", title_case(&current.description)),
    ];

    let line_height = 40;
    let top = height as i32 / 2 - (lines.len() as i32 * line_height) / 2;
    for (i, line) in lines.iter().enumerate() {
        let style = if i == 0 {
            (FONT, 30).into_font().style(FontStyle::Bold)
        } else {
            (FONT, 28).into_font()
        };
        area.draw(&Text::new(
            line.as_str(),
            (60, top + i as i32 * line_height),
            style,
        ))?;
    }
    Ok(())
}

/// Temperature and feels-like over time.
pub(crate) fn temperature_trend(
    area: &Panel,
    times: &[DateTime<FixedOffset>],
    temperature: &[f64],
    feels_like: &[f64],
) -> Result<(), RenderError> {
    let y_range = value_range(&[temperature, feels_like].concat(), 0.1);
    let mut chart = ChartBuilder::on(area)
        .caption("Temperature Forecast (5 Days)", caption_style())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(time_range(times), y_range)?;

    chart
        .configure_mesh()
        .label_style(label_style())
        .axis_desc_style(desc_style())
        .x_labels(5)
        .x_label_formatter(&time_label)
        .y_desc("Temperature (°C)")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart
        .draw_series(
            LineSeries::new(
                times.iter().copied().zip(temperature.iter().copied()),
                TEMPERATURE.stroke_width(3),
            )
            .point_size(3),
        )?
        .label("Temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TEMPERATURE.stroke_width(3)));

    chart
        .draw_series(DashedLineSeries::new(
            times.iter().copied().zip(feels_like.iter().copied()),
            10,
            6,
            FEELS_LIKE.stroke_width(3),
        ))?
        .label("Feels Like")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], FEELS_LIKE.stroke_width(3)));

    chart
        .configure_series_labels()
        .label_font(label_style())
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.3))
        .draw()?;
    Ok(())
}

/// Histogram of temperatures with a density curve scaled to counts.
pub(crate) fn temperature_distribution(
    area: &Panel,
    temperature: &[f64],
) -> Result<(), RenderError> {
    let bins = histogram(temperature);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Ok(());
    };
    let bin_width = first.end - first.start;
    let kde: Vec<(f64, f64)> = gaussian_kde(temperature, 200)
        .into_iter()
        .map(|(x, density)| (x, density * temperature.len() as f64 * bin_width))
        .collect();

    let top = bins
        .iter()
        .map(|b| b.count as f64)
        .chain(kde.iter().map(|(_, y)| *y))
        .fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption("Temperature Distribution", caption_style())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(first.start..last.end, 0.0..top * 1.15)?;

    chart
        .configure_mesh()
        .label_style(label_style())
        .axis_desc_style(desc_style())
        .x_desc("Temperature (°C)")
        .y_desc("Frequency")
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            TEMPERATURE.mix(0.7).filled(),
        )
    }))?;
    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            BLACK.stroke_width(1),
        )
    }))?;
    chart.draw_series(LineSeries::new(kde, TEMPERATURE.stroke_width(3)))?;
    Ok(())
}

/// Humidity over time as a filled area.
pub(crate) fn humidity_trend(
    area: &Panel,
    times: &[DateTime<FixedOffset>],
    humidity: &[f64],
) -> Result<(), RenderError> {
    let top = min_max(humidity).map_or(100.0, |(_, max)| max + 10.0);
    let mut chart = ChartBuilder::on(area)
        .caption("Humidity Forecast", caption_style())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(time_range(times), 0.0..top)?;

    chart
        .configure_mesh()
        .label_style(label_style())
        .axis_desc_style(desc_style())
        .x_labels(5)
        .x_label_formatter(&time_label)
        .y_desc("Humidity (%)")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let points = || times.iter().copied().zip(humidity.iter().copied());
    chart.draw_series(
        AreaSeries::new(points(), 0.0, HUMIDITY.mix(0.3)).border_style(HUMIDITY.stroke_width(2)),
    )?;
    chart.draw_series(
        points().map(|point| Circle::new(point, 4, HUMIDITY.filled())),
    )?;
    Ok(())
}

/// One bar per forecast point for wind speed.
pub(crate) fn wind_bars(
    area: &Panel,
    times: &[DateTime<FixedOffset>],
    wind_speed: &[f64],
) -> Result<(), RenderError> {
    let top = min_max(wind_speed).map_or(1.0, |(_, max)| (max * 1.15).max(1.0));
    let x_range = time_range(times);
    let x_range = (x_range.start - TimeDelta::hours(2))..(x_range.end + TimeDelta::hours(2));
    let half_width = TimeDelta::minutes(60);

    let mut chart = ChartBuilder::on(area)
        .caption("Wind Speed Forecast", caption_style())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0.0..top)?;

    chart
        .configure_mesh()
        .label_style(label_style())
        .axis_desc_style(desc_style())
        .x_labels(5)
        .x_label_formatter(&time_label)
        .y_desc("Wind Speed (m/s)")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(times.iter().zip(wind_speed).map(|(time, speed)| {
        Rectangle::new(
            [(*time - half_width, 0.0), (*time + half_width, *speed)],
            WIND.mix(0.8).filled(),
        )
    }))?;
    Ok(())
}

/// Pressure over time with markers.
pub(crate) fn pressure_trend(
    area: &Panel,
    times: &[DateTime<FixedOffset>],
    pressure: &[f64],
) -> Result<(), RenderError> {
    let mut chart = ChartBuilder::on(area)
        .caption("Atmospheric Pressure", caption_style())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(time_range(times), value_range(pressure, 0.1))?;

    chart
        .configure_mesh()
        .label_style(label_style())
        .axis_desc_style(desc_style())
        .x_labels(5)
        .x_label_formatter(&time_label)
        .y_desc("Pressure (hPa)")
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let points = || times.iter().copied().zip(pressure.iter().copied());
    chart.draw_series(LineSeries::new(points(), BLACK.mix(0.6).stroke_width(2)))?;
    chart.draw_series(points().map(|point| TriangleMarker::new(point, 7, PRESSURE.filled())))?;
    Ok(())
}

/// Share of each condition group, starting at 12 o'clock.
pub(crate) fn condition_shares(
    area: &Panel,
    counts: &[(String, i64)],
) -> Result<(), RenderError> {
    let area = area.titled("Weather Conditions Distribution", caption_style())?;
    if counts.is_empty() {
        return Ok(());
    }

    // Pie takes backend pixels, not coordinates relative to the cell.
    let (width, height) = area.dim_in_pixel();
    let (left, top) = area.get_base_pixel();
    let center = (left + width as i32 / 2, top + height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.32;
    let sizes: Vec<f64> = counts.iter().map(|(_, count)| *count as f64).collect();
    let colors: Vec<RGBColor> = (0..counts.len())
        .map(|i| PIE_COLORS[i % PIE_COLORS.len()])
        .collect();
    let labels: Vec<&str> = counts.iter().map(|(name, _)| name.as_str()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style((FONT, 26).into_font().color(&BLACK));
    pie.percentages((FONT, 22).into_font().color(&BLACK));
    area.draw(&pie)?;
    Ok(())
}

/// Temperature against humidity, coloured by wind speed, with a colour bar.
pub(crate) fn temperature_vs_humidity(
    area: &Panel,
    temperature: &[f64],
    humidity: &[f64],
    wind_speed: &[f64],
) -> Result<(), RenderError> {
    let (width, _) = area.dim_in_pixel();
    let (plot, bar) = area.split_horizontally(width as i32 - 130);
    let (wind_min, wind_max) = min_max(wind_speed).unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(&plot)
        .caption("Temperature vs Humidity", caption_style())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(value_range(temperature, 0.1), value_range(humidity, 0.1))?;

    chart
        .configure_mesh()
        .label_style(label_style())
        .axis_desc_style(desc_style())
        .x_desc("Temperature (°C)")
        .y_desc("Humidity (%)")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let points = temperature.iter().zip(humidity).zip(wind_speed);
    chart.draw_series(points.clone().map(|((t, h), w)| {
        Circle::new((*t, *h), 9, viridis(*w, wind_min, wind_max).mix(0.6).filled())
    }))?;
    chart.draw_series(points.map(|((t, h), _)| Circle::new((*t, *h), 9, BLACK.stroke_width(1))))?;

    let mut scale = ChartBuilder::on(&bar)
        .margin_top(70)
        .margin_bottom(70)
        .margin_right(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, wind_min..wind_max.max(wind_min + 0.1))?;

    scale
        .configure_mesh()
        .label_style(label_style())
        .axis_desc_style(desc_style())
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_desc("Wind Speed (m/s)")
        .y_label_formatter(&|y: &f64| format!("{:.1}", y))
        .draw()?;

    let steps = 50;
    let step = (wind_max - wind_min).max(0.1) / steps as f64;
    scale.draw_series((0..steps).map(|i| {
        let low = wind_min + i as f64 * step;
        Rectangle::new(
            [(0.0, low), (1.0, low + step)],
            viridis(low + step / 2.0, wind_min, wind_max).filled(),
        )
    }))?;
    Ok(())
}

/// Daily min–max bars with the daily mean as a line.
pub(crate) fn daily_ranges(area: &Panel, days: &[DailyStats]) -> Result<(), RenderError> {
    let values: Vec<f64> = days
        .iter()
        .flat_map(|d| [d.min_temp, d.max_temp])
        .collect();
    let x_range = -0.5..(days.len() as f64 - 0.5).max(0.5);

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Temperature Range", caption_style())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, value_range(&values, 0.15))?;

    let label = |x: &f64| {
        let index = x.round();
        if (x - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        days.get(index as usize)
            .map(|d| d.date.format("%m-%d").to_string())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .label_style(label_style())
        .axis_desc_style(desc_style())
        .x_labels(days.len().max(1))
        .x_label_formatter(&label)
        .disable_x_mesh()
        .y_desc("Temperature (°C)")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart
        .draw_series(days.iter().enumerate().map(|(i, d)| {
            let x = i as f64;
            Rectangle::new(
                [(x - 0.3, d.min_temp), (x + 0.3, d.max_temp)],
                HUMIDITY.mix(0.7).filled(),
            )
        }))?
        .label("Min-Max Range")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 20, y + 6)], HUMIDITY.mix(0.7).filled()));

    chart
        .draw_series(
            LineSeries::new(
                days.iter().enumerate().map(|(i, d)| (i as f64, d.mean_temp)),
                DAILY_MEAN.stroke_width(3),
            )
            .point_size(5),
        )?
        .label("Average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DAILY_MEAN.stroke_width(3)));

    chart
        .configure_series_labels()
        .label_font(label_style())
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.3))
        .draw()?;
    Ok(())
}
