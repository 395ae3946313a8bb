pub mod chart;
pub mod symlog;

pub use chart::{render_correlation, render_error_curves};

use plotters::drawing::DrawingAreaErrorKind;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("drawing failed: {0}")]
    Draw(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(err.to_string())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

impl ChartSize {
    pub const MIN: ChartSize = ChartSize {
        width: 320,
        height: 240,
    };

    fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

pub fn ensure_output_dir(dir: &std::path::Path) -> Result<(), RenderError> {
    std::fs::create_dir_all(dir).map_err(|source| RenderError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}
