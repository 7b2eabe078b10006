// error.rs     Error definitions
//
// Copyright (c) 2022-2024  Douglas Lau
//

/// Pyramid errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O {0}")]
    Io(#[from] std::io::Error),

    /// Sphere subdivision depth too large
    #[error("Subdivision depth out of range: {0}")]
    DepthOutOfRange(u32),

    /// Chaikin rounds too large
    #[error("Chaikin rounds out of range: {0}")]
    RoundsOutOfRange(u32),

    /// Polygon with too few points
    #[error("Too few polygon points: {0}")]
    TooFewPoints(usize),

    /// Polyline with no points
    #[error("Empty polyline")]
    EmptyPolyline,

    /// Invalid waypoint count
    #[error("Invalid waypoint count: {0}")]
    InvalidWaypointCount(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
