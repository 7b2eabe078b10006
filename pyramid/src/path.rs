// path.rs      Animation path module
//
// Copyright (c) 2024  Douglas Lau
//
use crate::error::{Error, Result};
use glam::Vec4;

/// Default number of waypoints in one animation loop
pub const DEFAULT_WAYPOINTS: usize = 150;

/// Animation path
///
/// A fixed number of waypoints for one full animation loop.  A path always
/// has at least one waypoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Waypoint positions
    waypoints: Vec<Vec4>,
}

impl Path {
    /// Get number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Check if the path is empty (never true)
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Get a waypoint (wrapping around the loop)
    pub fn waypoint(&self, i: usize) -> Vec4 {
        self.waypoints[i % self.waypoints.len()]
    }

    /// Get slice of all waypoints
    pub fn waypoints(&self) -> &[Vec4] {
        &self.waypoints[..]
    }
}

/// Pick the nearest polyline point for each waypoint
fn decimate(polyline: &[Vec4], count: usize, step: f64) -> Vec<Vec4> {
    let last = polyline.len() - 1;
    (0..count)
        .map(|i| {
            let idx = (i as f64 * step).round() as usize;
            polyline[idx.min(last)]
        })
        .collect()
}

/// Interpolate between polyline points for each waypoint
///
/// Only X and Y are interpolated; Z and W come from the upper point.
fn interpolate(polyline: &[Vec4], count: usize, step: f64) -> Vec<Vec4> {
    let last = polyline[polyline.len() - 1];
    (0..count)
        .map(|i| {
            let pos = i as f64 * step;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = (pos - pos.floor()) as f32;
            match (polyline.get(lo), polyline.get(hi)) {
                (Some(p0), Some(p1)) => Vec4::new(
                    p1.x * frac + p0.x * (1.0 - frac),
                    p1.y * frac + p0.y * (1.0 - frac),
                    p1.z,
                    p1.w,
                ),
                _ => last,
            }
        })
        .collect()
}

/// Resample a polyline into an animation path
///
/// The path has exactly `count` waypoints:
/// - a polyline of `count` points is used as-is
/// - a longer polyline is decimated to the nearest points
/// - a shorter polyline is linearly interpolated
///
/// ```rust
/// # use pyramid::{chaikin, resample, SEED_HEXAGON};
/// let curve = chaikin(&SEED_HEXAGON, 3).unwrap();
/// let path = resample(&curve, 150).unwrap();
/// assert_eq!(path.len(), 150);
/// ```
pub fn resample(polyline: &[Vec4], count: usize) -> Result<Path> {
    if count == 0 {
        return Err(Error::InvalidWaypointCount(count));
    }
    let len = polyline.len();
    if len == 0 {
        return Err(Error::EmptyPolyline);
    }
    let step = (len - 1) as f64 / count as f64;
    let waypoints = match len.cmp(&count) {
        std::cmp::Ordering::Equal => polyline.to_vec(),
        std::cmp::Ordering::Greater => decimate(polyline, count, step),
        std::cmp::Ordering::Less => interpolate(polyline, count, step),
    };
    log::debug!("resampled {len} points to {count} waypoints");
    Ok(Path { waypoints })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chaikin::{chaikin, SEED_HEXAGON};

    fn pt(x: f32, y: f32) -> Vec4 {
        Vec4::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn same_length() {
        let curve = chaikin(&SEED_HEXAGON, 0).unwrap();
        let path = resample(&curve, curve.len()).unwrap();
        assert_eq!(path.waypoints(), &curve[..]);
    }

    #[test]
    fn exact_counts() {
        for rounds in 0..=8 {
            let curve = chaikin(&SEED_HEXAGON, rounds).unwrap();
            for count in [1, 2, 7, 12, 150, 1000] {
                let path = resample(&curve, count).unwrap();
                assert_eq!(path.len(), count);
            }
        }
        let path = resample(&[pt(1.0, 2.0)], 5).unwrap();
        assert_eq!(path.waypoints(), &[pt(1.0, 2.0); 5]);
    }

    #[test]
    fn nearest_index() {
        let line = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)];
        // step = (3 - 1) / 2 = 1
        let path = resample(&line, 2).unwrap();
        assert_eq!(path.waypoints(), &[pt(0.0, 0.0), pt(10.0, 0.0)]);
        // step = 2, only index 0 is used
        let path = resample(&line, 1).unwrap();
        assert_eq!(path.waypoints(), &[pt(0.0, 0.0)]);
    }

    #[test]
    fn decimate_round_half_up() {
        let line: Vec<Vec4> = (0..11).map(|i| pt(i as f32, 0.0)).collect();
        // step = 10 / 4 = 2.5
        let path = resample(&line, 4).unwrap();
        let xs: Vec<f32> = path.waypoints().iter().map(|p| p.x).collect();
        assert_eq!(xs, [0.0, 3.0, 5.0, 8.0]);
    }

    #[test]
    fn interpolated() {
        let line = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)];
        // step = 2 / 8 = 0.25
        let path = resample(&line, 8).unwrap();
        let expected = [
            pt(0.0, 0.0),
            pt(2.5, 0.0),
            pt(5.0, 0.0),
            pt(7.5, 0.0),
            pt(10.0, 0.0),
            pt(10.0, 2.5),
            pt(10.0, 5.0),
            pt(10.0, 7.5),
        ];
        assert_eq!(path.waypoints(), &expected);
    }

    #[test]
    fn interpolated_z_w_from_upper() {
        let line =
            [Vec4::new(0.0, 0.0, 1.0, 1.0), Vec4::new(4.0, 0.0, 3.0, 0.5)];
        let path = resample(&line, 4).unwrap();
        assert_eq!(path.waypoint(0), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(path.waypoint(1), Vec4::new(1.0, 0.0, 3.0, 0.5));
        assert_eq!(path.waypoint(3), Vec4::new(3.0, 0.0, 3.0, 0.5));
        assert_eq!(path.waypoint(4), path.waypoint(0));
    }

    #[test]
    fn invalid_input() {
        let line = [pt(0.0, 0.0)];
        assert!(matches!(
            resample(&line, 0),
            Err(Error::InvalidWaypointCount(0))
        ));
        assert!(matches!(resample(&[], 10), Err(Error::EmptyPolyline)));
    }
}
