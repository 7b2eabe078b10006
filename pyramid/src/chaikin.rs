// chaikin.rs   Chaikin curve module
//
// Copyright (c) 2024  Douglas Lau
//
use crate::error::{Error, Result};
use glam::Vec4;

/// Maximum number of Chaikin rounds
pub const MAX_ROUNDS: u32 = 16;

/// Seed hexagon for the animation curve
pub const SEED_HEXAGON: [Vec4; 6] = [
    Vec4::new(-8.0, 8.0, 0.0, 1.0),
    Vec4::new(2.0, 4.0, 0.0, 1.0),
    Vec4::new(6.0, 6.0, 0.0, 1.0),
    Vec4::new(10.0, -8.0, 0.0, 1.0),
    Vec4::new(2.0, -2.0, 0.0, 1.0),
    Vec4::new(-6.0, -2.0, 0.0, 1.0),
];

/// Cut corners of a closed polyline once
///
/// Each edge `p0 -> p1` is replaced by points at 1/4 and 3/4 of its length.
/// Z and W are copied from `p0`.
fn cut_corners(points: &[Vec4]) -> Vec<Vec4> {
    let len = points.len();
    let mut cut = Vec::with_capacity(len * 2);
    for (i, p0) in points.iter().enumerate() {
        let p1 = points[(i + 1) % len];
        let q = *p0 * 0.75 + p1 * 0.25;
        let r = *p0 * 0.25 + p1 * 0.75;
        cut.push(Vec4::new(q.x, q.y, p0.z, p0.w));
        cut.push(Vec4::new(r.x, r.y, p0.z, p0.w));
    }
    cut
}

/// Smooth a closed polygon with Chaikin subdivision
///
/// With zero `rounds`, the polygon is returned with its first point repeated
/// at the end, so it can be drawn as a closed line strip.  Otherwise, the
/// result has `polygon.len() * 2^rounds` points and is not re-closed.
///
/// ```rust
/// # use pyramid::{chaikin, SEED_HEXAGON};
/// let curve = chaikin(&SEED_HEXAGON, 2).unwrap();
/// assert_eq!(curve.len(), 24);
/// ```
pub fn chaikin(polygon: &[Vec4], rounds: u32) -> Result<Vec<Vec4>> {
    if polygon.len() < 3 {
        return Err(Error::TooFewPoints(polygon.len()));
    }
    if rounds > MAX_ROUNDS {
        return Err(Error::RoundsOutOfRange(rounds));
    }
    let mut points = polygon.to_vec();
    if rounds == 0 {
        points.push(polygon[0]);
    }
    for _ in 0..rounds {
        points = cut_corners(&points);
    }
    log::debug!("chaikin rounds {rounds}: {} points", points.len());
    Ok(points)
}
