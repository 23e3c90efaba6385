use std::ops::Sub;

/// A straight line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    /// Fits the line through two points.
    ///
    /// Returns `None` if the points share an `x` value or the fit is not finite.
    #[must_use]
    pub fn through((x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> Option<Self> {
        let slope = (y1 - y0) / (x1 - x0);
        let intercept = y0 - slope * x0;
        (slope.is_finite() && intercept.is_finite()).then_some(Self { slope, intercept })
    }

    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Returns the `x` where the line crosses zero, or `None` if it is flat.
    #[must_use]
    pub fn root(&self) -> Option<f64> {
        if self.slope == 0.0 {
            return None;
        }
        let x = -self.intercept / self.slope;
        x.is_finite().then_some(x)
    }
}

impl Sub for Line {
    type Output = Line;

    fn sub(self, rhs: Line) -> Line {
        Line {
            slope: self.slope - rhs.slope,
            intercept: self.intercept - rhs.intercept,
        }
    }
}

/// Evaluates the polynomial through `points` at `x` (Lagrange form).
///
/// With four points this is the exact cubic through them.
/// Returns `None` if `points` is empty or two points share an `x` value.
#[must_use]
pub fn interpolate(points: &[(f64, f64)], x: f64) -> Option<f64> {
    if points.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    for (i, &(xi, yi)) in points.iter().enumerate() {
        let mut basis = 1.0;
        for (j, &(xj, _)) in points.iter().enumerate() {
            if i != j {
                if xi == xj {
                    return None;
                }
                basis *= (x - xj) / (xi - xj);
            }
        }
        sum += yi * basis;
    }
    Some(sum)
}

/// Returns `n` evenly spaced values from `start` to `end`, both included.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
