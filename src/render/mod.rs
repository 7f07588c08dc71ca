//! Draws a [`DashboardData`] as a single PNG with a 3x3 grid of panels.

pub mod error;
mod panels;
pub mod stats;

use crate::dashboard::DashboardData;
use crate::render::error::RenderError;
use crate::render::panels::Panel;
use log::{debug, info};
use plotters::prelude::*;
use std::fs;
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 2400;
pub const DEFAULT_HEIGHT: u32 = 1800;

/// Renders the dashboard image.
///
/// The default size is 2400x1800 pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardRenderer {
    width: u32,
    height: u32,
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl DashboardRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dashboard title, marking synthesized data.
    pub fn title(data: &DashboardData) -> String {
        if data.mode.is_demo() {
            format!("Weather Dashboard - {} (DEMO DATA)", data.city)
        } else {
            format!("Weather Dashboard - {}", data.city)
        }
    }

    /// Draws all nine panels and writes the PNG to `path`, creating its parent
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyTable`] if the forecast has no rows, and
    /// [`RenderError::Drawing`] if the backend fails to draw or encode the image.
    pub fn render(&self, data: &DashboardData, path: &Path) -> Result<(), RenderError> {
        if data.forecast.is_empty() {
            return Err(RenderError::EmptyTable);
        }
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| RenderError::OutputDir(dir.to_path_buf(), e))?;
        }
        debug!("Rendering dashboard to {}", path.display());

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        self.draw(&root, data)?;
        info!("Dashboard saved as {}", path.display());
        Ok(())
    }

    /// Draws the dashboard into an RGB buffer of `width * height * 3` bytes.
    pub fn render_to_buffer(
        &self,
        data: &DashboardData,
        buffer: &mut [u8],
    ) -> Result<(), RenderError> {
        if data.forecast.is_empty() {
            return Err(RenderError::EmptyTable);
        }
        let expected = self.width as usize * self.height as usize * 3;
        if buffer.len() != expected {
            return Err(RenderError::Drawing(format!(
                "buffer holds {} bytes, a {}x{} image needs {}",
                buffer.len(),
                self.width,
                self.height,
                expected
            )));
        }

        let root =
            BitMapBackend::with_buffer(buffer, (self.width, self.height)).into_drawing_area();
        self.draw(&root, data)
    }

    fn draw(&self, root: &Panel, data: &DashboardData) -> Result<(), RenderError> {
        let times = data.forecast.local_timestamps()?;
        let temperature = data.forecast.float_column("temperature")?;
        let feels_like = data.forecast.float_column("feels_like")?;
        let humidity = data.forecast.float_column("humidity")?;
        let pressure = data.forecast.float_column("pressure")?;
        let wind_speed = data.forecast.float_column("wind_speed")?;
        let conditions = data.forecast.condition_counts()?;
        let days = data.daily.rows()?;
        debug!(
            "Drawing {} forecast points and {} days",
            times.len(),
            days.len()
        );

        root.fill(&WHITE)?;
        let titled = root.titled(
            &Self::title(data),
            ("sans-serif", 48).into_font().style(FontStyle::Bold),
        )?;

        let cells = titled.split_evenly((3, 3));
        let [current, trend, distribution, humidity_cell, wind, pressure_cell, shares, scatter, daily] =
            cells.as_slice()
        else {
            return Err(RenderError::Drawing(format!(
                "expected 9 panels, got {}",
                cells.len()
            )));
        };

        panels::current_conditions(current, &data.current)?;
        panels::temperature_trend(trend, &times, &temperature, &feels_like)?;
        panels::temperature_distribution(distribution, &temperature)?;
        panels::humidity_trend(humidity_cell, &times, &humidity)?;
        panels::wind_bars(wind, &times, &wind_speed)?;
        panels::pressure_trend(pressure_cell, &times, &pressure)?;
        panels::condition_shares(shares, &conditions)?;
        panels::temperature_vs_humidity(scatter, &temperature, &humidity, &wind_speed)?;
        panels::daily_ranges(daily, &days)?;

        root.present()?;
        Ok(())
    }
}
