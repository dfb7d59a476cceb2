//! # Spline Fitter
//!
//! Turns a spline entity into an evenly parameterised polyline.
//!
//! Fit points are preferred. They are interpolated with a zero-smoothing
//! parametric spline over chord-length parameters: linear for two points,
//! the quadratic through three, and a not-a-knot cubic for four or more.
//!
//! Without usable fit points the control polygon is evaluated as a
//! (possibly rational) B-spline with de Boor's algorithm. That curve only
//! passes through its end control points.

use crate::entity::SplineEntity;
use cutpath_core::{Point2D, Result, TrajectoryError};
use nalgebra::DMatrix;

const KNOT_EPSILON: f64 = 1e-12;

/// Resamples spline entities into a fixed number of points.
#[derive(Debug, Clone, Copy)]
pub struct SplineFitter {
    samples: usize,
}

impl SplineFitter {
    pub fn new(samples: usize) -> Self {
        debug_assert!(samples >= 2, "spline samples must be >= 2, got {samples}");
        Self { samples }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Fit and resample a spline.
    ///
    /// Returns an empty vector when neither fit points nor control points
    /// provide at least two entries.
    pub fn fit(&self, spline: &SplineEntity) -> Result<Vec<Point2D>> {
        let fit_points = collapse_duplicates(&spline.fit_points);
        if fit_points.len() >= 2 {
            return self.interpolate(&fit_points);
        }

        if spline.control_points.len() >= 2 {
            return self.evaluate_control_polygon(spline);
        }

        Ok(Vec::new())
    }

    /// Interpolating spline through `points` (no two consecutive equal).
    pub fn interpolate(&self, points: &[Point2D]) -> Result<Vec<Point2D>> {
        let params = chord_length_parameters(points);
        let curve = InterpolatingCurve::new(points, params)?;
        Ok(sample_parameters(self.samples)
            .map(|t| curve.evaluate(t))
            .collect())
    }

    fn evaluate_control_polygon(&self, spline: &SplineEntity) -> Result<Vec<Point2D>> {
        let ctrl = &spline.control_points;
        let n = ctrl.len();
        let declared = if spline.degree == 0 { 3 } else { spline.degree };
        let degree = declared.min(n - 1);

        let knots = if knots_are_consistent(&spline.knots, n, degree) {
            spline.knots.clone()
        } else {
            clamped_uniform_knots(n, degree)
        };

        // Positive weights keep every homogeneous denominator positive;
        // scaling by the largest one keeps it away from underflow.
        let weights = if spline.weights.len() == n
            && spline.weights.iter().all(|w| w.is_finite() && *w > 0.0)
        {
            let max = spline.weights.iter().copied().fold(0.0, f64::max);
            spline.weights.iter().map(|w| w / max).collect()
        } else {
            vec![1.0; n]
        };

        let lo = knots[degree];
        let hi = knots[n];

        Ok(sample_parameters(self.samples)
            .map(|t| de_boor(ctrl, &weights, &knots, degree, lo + (hi - lo) * t))
            .collect())
    }
}

/// Uniform parameters over [0, 1], both ends included exactly.
fn sample_parameters(samples: usize) -> impl Iterator<Item = f64> {
    let last = (samples.max(2) - 1) as f64;
    (0..samples.max(2)).map(move |k| k as f64 / last)
}

fn collapse_duplicates(points: &[Point2D]) -> Vec<Point2D> {
    let mut out: Vec<Point2D> = Vec::with_capacity(points.len());
    for p in points {
        if out.last() != Some(p) {
            out.push(*p);
        }
    }
    out
}

/// Cumulative chord length normalised to [0, 1].
fn chord_length_parameters(points: &[Point2D]) -> Vec<f64> {
    let mut params = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    params.push(0.0);
    for w in points.windows(2) {
        acc += w[0].distance_to(&w[1]);
        params.push(acc);
    }
    for u in params.iter_mut() {
        *u /= acc;
    }
    if let Some(last) = params.last_mut() {
        *last = 1.0;
    }
    params
}

enum InterpolatingCurve {
    Linear {
        p0: Point2D,
        p1: Point2D,
    },
    Quadratic {
        points: [Point2D; 3],
        params: [f64; 3],
    },
    Cubic {
        points: Vec<Point2D>,
        params: Vec<f64>,
        /// Second derivatives at each knot, columns x and y.
        moments: DMatrix<f64>,
    },
}

impl InterpolatingCurve {
    fn new(points: &[Point2D], params: Vec<f64>) -> Result<Self> {
        match points.len() {
            0 | 1 => Err(TrajectoryError::Spline(
                "at least two fit points are required".to_string(),
            )),
            2 => Ok(Self::Linear {
                p0: points[0],
                p1: points[1],
            }),
            3 => Ok(Self::Quadratic {
                points: [points[0], points[1], points[2]],
                params: [params[0], params[1], params[2]],
            }),
            _ => {
                let moments = not_a_knot_moments(points, &params)?;
                Ok(Self::Cubic {
                    points: points.to_vec(),
                    params,
                    moments,
                })
            }
        }
    }

    fn evaluate(&self, t: f64) -> Point2D {
        match self {
            Self::Linear { p0, p1 } => {
                Point2D::new(p0.x + (p1.x - p0.x) * t, p0.y + (p1.y - p0.y) * t)
            }
            Self::Quadratic { points, params } => {
                let [u0, u1, u2] = *params;
                let l0 = (t - u1) * (t - u2) / ((u0 - u1) * (u0 - u2));
                let l1 = (t - u0) * (t - u2) / ((u1 - u0) * (u1 - u2));
                let l2 = (t - u0) * (t - u1) / ((u2 - u0) * (u2 - u1));
                Point2D::new(
                    l0 * points[0].x + l1 * points[1].x + l2 * points[2].x,
                    l0 * points[0].y + l1 * points[1].y + l2 * points[2].y,
                )
            }
            Self::Cubic {
                points,
                params,
                moments,
            } => {
                let n = points.len();
                let i = params
                    .partition_point(|&u| u <= t)
                    .saturating_sub(1)
                    .min(n - 2);
                let h = params[i + 1] - params[i];
                let a = params[i + 1] - t;
                let b = t - params[i];

                let eval = |y0: f64, y1: f64, m0: f64, m1: f64| {
                    m0 * a.powi(3) / (6.0 * h)
                        + m1 * b.powi(3) / (6.0 * h)
                        + (y0 / h - m0 * h / 6.0) * a
                        + (y1 / h - m1 * h / 6.0) * b
                };

                Point2D::new(
                    eval(
                        points[i].x,
                        points[i + 1].x,
                        moments[(i, 0)],
                        moments[(i + 1, 0)],
                    ),
                    eval(
                        points[i].y,
                        points[i + 1].y,
                        moments[(i, 1)],
                        moments[(i + 1, 1)],
                    ),
                )
            }
        }
    }
}

/// Solve for the second derivatives of a not-a-knot cubic spline
/// (third derivative continuous across the second and second-to-last knots).
fn not_a_knot_moments(points: &[Point2D], params: &[f64]) -> Result<DMatrix<f64>> {
    let n = points.len();
    let h: Vec<f64> = params.windows(2).map(|w| w[1] - w[0]).collect();

    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut rhs = DMatrix::<f64>::zeros(n, 2);

    a[(0, 0)] = h[1];
    a[(0, 1)] = -(h[0] + h[1]);
    a[(0, 2)] = h[0];

    for i in 1..n - 1 {
        a[(i, i - 1)] = h[i - 1];
        a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
        a[(i, i + 1)] = h[i];
        rhs[(i, 0)] = 6.0
            * ((points[i + 1].x - points[i].x) / h[i] - (points[i].x - points[i - 1].x) / h[i - 1]);
        rhs[(i, 1)] = 6.0
            * ((points[i + 1].y - points[i].y) / h[i] - (points[i].y - points[i - 1].y) / h[i - 1]);
    }

    a[(n - 1, n - 3)] = h[n - 2];
    a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
    a[(n - 1, n - 1)] = h[n - 3];

    a.lu()
        .solve(&rhs)
        .ok_or_else(|| TrajectoryError::Spline("singular interpolation system".to_string()))
}

fn knots_are_consistent(knots: &[f64], n: usize, degree: usize) -> bool {
    knots.len() == n + degree + 1
        && knots.iter().all(|k| k.is_finite())
        && knots.windows(2).all(|w| w[0] <= w[1])
        && knots[n] - knots[degree] > KNOT_EPSILON
}

/// Clamped knot vector with uniformly spaced interior knots on [0, 1].
fn clamped_uniform_knots(n: usize, degree: usize) -> Vec<f64> {
    let interior = n - degree - 1;
    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    for i in 1..=interior {
        knots.push(i as f64 / (interior + 1) as f64);
    }
    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

/// Knot span index `k` with `knots[k] <= u < knots[k + 1]`, clamped to the
/// last non-empty span at the end of the domain.
fn find_span(knots: &[f64], degree: usize, n: usize, u: f64) -> usize {
    if u >= knots[n] {
        let mut k = n - 1;
        while k > degree && knots[k] >= knots[n] {
            k -= 1;
        }
        return k;
    }

    let mut k = degree;
    while k < n - 1 && knots[k + 1] <= u {
        k += 1;
    }
    k
}

fn de_boor(
    ctrl: &[Point2D],
    weights: &[f64],
    knots: &[f64],
    degree: usize,
    u: f64,
) -> Point2D {
    let n = ctrl.len();
    let k = find_span(knots, degree, n, u);

    // Homogeneous coordinates (x·w, y·w, w)
    let mut d: Vec<[f64; 3]> = (0..=degree)
        .map(|j| {
            let i = j + k - degree;
            let w = weights[i];
            [ctrl[i].x * w, ctrl[i].y * w, w]
        })
        .collect();

    for r in 1..=degree {
        for j in (r..=degree).rev() {
            let i = j + k - degree;
            let denom = knots[i + degree + 1 - r] - knots[i];
            let alpha = if denom.abs() < KNOT_EPSILON {
                0.0
            } else {
                (u - knots[i]) / denom
            };
            let prev = d[j - 1];
            let cur = d[j];
            d[j] = [
                (1.0 - alpha) * prev[0] + alpha * cur[0],
                (1.0 - alpha) * prev[1] + alpha * cur[1],
                (1.0 - alpha) * prev[2] + alpha * cur[2],
            ];
        }
    }

    let [x, y, w] = d[degree];
    Point2D::new(x / w, y / w)
}
