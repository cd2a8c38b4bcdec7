/// Simplified error system - no over-engineering!
#[derive(Debug, Clone)]
pub enum ChartError {
    DataError(String),
    RenderingError(String),
    SurfaceError(String),
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::DataError(msg) => write!(f, "Data Error: {}", msg),
            ChartError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            ChartError::SurfaceError(msg) => write!(f, "Surface Error: {}", msg),
        }
    }
}

impl std::error::Error for ChartError {}

// Simple convenience type aliases
pub type DataResult<T> = Result<T, ChartError>;
pub type RenderingResult<T> = Result<T, ChartError>;
