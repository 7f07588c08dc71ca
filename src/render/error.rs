use crate::table::error::TableError;
use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to draw dashboard: {0}")]
    Drawing(String),

    #[error("Forecast table is empty, nothing to render")]
    EmptyTable,

    #[error("Failed to create output directory '{0}'")]
    OutputDir(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(error.to_string())
    }
}
