//! Arc-length sample tables.
//!
//! A [`PathTable`] is built once from a list of control points. Each
//! Catmull-Rom segment is sampled at evenly spaced parameters in `(0, 1]` and
//! the chord lengths between consecutive samples are accumulated into a
//! monotonic cumulative-length column. Distance queries (see the `query`
//! module) binary-search that column.
//!
//! # Looping vs Open
//!
//! - Looping paths use every control point as a segment start, wrapping the
//!   neighbor indices with a true modulo.
//! - Open paths mirror the second and second-to-last points through the
//!   endpoints to synthesize phantom neighbors, and only sample the segments
//!   between real control points.

use crate::catmull_rom::mirror_point;
use crate::{CatmullRomSegment, Curve, GroundPlane, PathConfig, PathError, Result};
use nalgebra::Point3;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum number of control points for either kind of path.
pub const MIN_CONTROL_POINTS: usize = 2;

/// One precomputed point on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Arc length from the start of the path up to this sample.
    pub cumulative_length: f64,
    /// Segment this sample lies on.
    pub segment: usize,
    /// Local parameter within the segment, in `(0, 1]`.
    pub t: f64,
    /// World position of the sample.
    pub position: Point3<f64>,
}

/// An arc-length-parameterized path built from control points.
///
/// Immutable once built. Any number of travelers can query the same table
/// concurrently; rebuilding means building a new table.
///
/// # Example
///
/// ```
/// use track_spline::PathTable;
/// use nalgebra::Point3;
///
/// let square = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
///
/// let table = PathTable::looping(&square, 10).expect("valid loop");
/// assert_eq!(table.len(), 40);
///
/// // Chords slightly underestimate the rounded loop's true length (~4.2038)
/// assert!((table.total_length() - 4.2038).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathTable {
    /// Control points as evaluated, phantoms included for open paths.
    control_points: Vec<Point3<f64>>,
    /// Samples ordered by cumulative length.
    samples: Vec<Sample>,
    /// Arc length of each segment.
    segment_lengths: Vec<f64>,
    /// Cumulative length at the final sample.
    total_length: f64,
    /// Configuration the table was built with.
    config: PathConfig,
}

impl PathTable {
    /// Build a table from control points.
    ///
    /// # Errors
    ///
    /// - [`PathError::InvalidSampleDensity`] if `samples_per_segment` is 0
    /// - [`PathError::InsufficientControlPoints`] if fewer than 2 points
    /// - [`PathError::NonFiniteControlPoint`] if a coordinate is NaN or infinite
    /// - [`PathError::DegeneratePath`] if the path has zero length in the
    ///   plane of travel
    pub fn build(points: &[Point3<f64>], config: &PathConfig) -> Result<Self> {
        config.validate()?;

        if points.len() < MIN_CONTROL_POINTS {
            return Err(PathError::insufficient_control_points(
                MIN_CONTROL_POINTS,
                points.len(),
            ));
        }

        if let Some(index) = points
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(PathError::NonFiniteControlPoint { index });
        }

        let control_points = if config.looping {
            points.to_vec()
        } else {
            with_phantom_points(points)
        };

        let (samples, segment_lengths, total_length) = sample_segments(&control_points, config);

        if !(total_length.is_finite() && total_length > 0.0) {
            return Err(PathError::degenerate_path(total_length));
        }

        info!(
            control_points = points.len(),
            samples = samples.len(),
            looping = config.looping,
            total_length,
            "Built path table"
        );

        Ok(Self {
            control_points,
            samples,
            segment_lengths,
            total_length,
            config: config.clone(),
        })
    }

    /// Build a closed loop with default settings and the given density.
    ///
    /// # Errors
    ///
    /// See [`Self::build`].
    pub fn looping(points: &[Point3<f64>], samples_per_segment: usize) -> Result<Self> {
        Self::build(points, &PathConfig::looping(samples_per_segment))
    }

    /// Build an open path with default settings and the given density.
    ///
    /// # Errors
    ///
    /// See [`Self::build`].
    pub fn open(points: &[Point3<f64>], samples_per_segment: usize) -> Result<Self> {
        Self::build(points, &PathConfig::open(samples_per_segment))
    }

    /// All samples, ordered by cumulative length.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the table has no samples (never true for a built table).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total arc length of the path (one full lap for loops).
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segment_lengths.len()
    }

    /// Arc length of each segment.
    #[must_use]
    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    /// Control points as used for evaluation.
    ///
    /// For open paths this includes the two phantom points at either end.
    #[must_use]
    pub fn control_points(&self) -> &[Point3<f64>] {
        &self.control_points
    }

    /// Whether the path is a closed loop.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.config.looping
    }

    /// Configuration the table was built with.
    #[must_use]
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Plane of travel.
    #[must_use]
    pub fn plane(&self) -> &GroundPlane {
        &self.config.plane
    }

    /// Get the curve for a segment.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<CatmullRomSegment> {
        (index < self.segment_count())
            .then(|| segment_curve(&self.control_points, self.config.looping, index))
    }

    /// Positions of every sample, in path order.
    ///
    /// Useful for hosts that place a marker at each sample.
    pub fn sample_positions(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.samples.iter().map(|s| s.position)
    }

    /// Curve for a segment index taken from a sample of this table.
    pub(crate) fn curve(&self, index: usize) -> CatmullRomSegment {
        segment_curve(&self.control_points, self.config.looping, index)
    }
}

/// Wrap a possibly negative index into `[0, len)`.
#[must_use]
pub fn wrap_index(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}

/// Extend an open path with mirrored phantom points at both ends.
fn with_phantom_points(points: &[Point3<f64>]) -> Vec<Point3<f64>> {
    let n = points.len();
    let mut extended = Vec::with_capacity(n + 2);
    extended.push(mirror_point(points[0], points[1]));
    extended.extend_from_slice(points);
    extended.push(mirror_point(points[n - 1], points[n - 2]));
    extended
}

/// Number of segments for a list of effective control points.
fn segment_count(control_points: &[Point3<f64>], looping: bool) -> usize {
    if looping {
        control_points.len()
    } else {
        // Phantoms bound the list; real points are 1..len-1
        control_points.len().saturating_sub(3)
    }
}

/// The four control points driving one segment.
fn segment_curve(control_points: &[Point3<f64>], looping: bool, index: usize) -> CatmullRomSegment {
    if looping {
        let n = control_points.len();
        let i = index as isize;
        CatmullRomSegment::new(
            control_points[wrap_index(i - 1, n)],
            control_points[wrap_index(i, n)],
            control_points[wrap_index(i + 1, n)],
            control_points[wrap_index(i + 2, n)],
        )
    } else {
        CatmullRomSegment::new(
            control_points[index],
            control_points[index + 1],
            control_points[index + 2],
            control_points[index + 3],
        )
    }
}

/// Sample every segment and accumulate chord lengths.
///
/// Returns the samples, the per-segment lengths, and the total length.
fn sample_segments(
    control_points: &[Point3<f64>],
    config: &PathConfig,
) -> (Vec<Sample>, Vec<f64>, f64) {
    let plane = config.plane;
    let per_segment = config.samples_per_segment;
    let segments = segment_count(control_points, config.looping);

    let mut samples = Vec::with_capacity(segments * per_segment);
    let mut segment_lengths = Vec::with_capacity(segments);
    let mut cumulative = 0.0;

    for segment in 0..segments {
        let curve = segment_curve(control_points, config.looping, segment);
        let mut previous = plane.pin(curve.point_at(0.0));
        let mut segment_length = 0.0;

        // t = 0 is covered by the end of the previous segment
        for k in 1..=per_segment {
            let t = k as f64 / per_segment as f64;
            let position = plane.pin(curve.point_at(t));
            let chord = plane.planar_length(position - previous);

            segment_length += chord;
            cumulative += chord;
            samples.push(Sample {
                cumulative_length: cumulative,
                segment,
                t,
                position,
            });
            previous = position;
        }

        debug!(segment, length = segment_length, "Sampled segment");
        segment_lengths.push(segment_length);
    }

    (samples, segment_lengths, cumulative)
}
