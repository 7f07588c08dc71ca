use std::fmt;

/// Where weather records come from for the remainder of a run.
///
/// A source starts in the mode it was configured with. [`SourceMode::Live`] moves to
/// [`SourceMode::Demo`] on the first failed request and never moves back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceMode {
    /// Records are fetched from the remote API.
    Live,
    /// Records are synthesized locally.
    Demo,
}

impl SourceMode {
    pub fn is_demo(&self) -> bool {
        matches!(self, SourceMode::Demo)
    }

    /// File name of the rendered dashboard for this mode.
    pub(crate) fn output_file_name(&self) -> &'static str {
        match self {
            SourceMode::Live => "weather_dashboard.png",
            SourceMode::Demo => "weather_dashboard_demo.png",
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Live => write!(f, "live"),
            SourceMode::Demo => write!(f, "demo"),
        }
    }
}
