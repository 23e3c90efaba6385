use super::{Curve, Line};

/// A crossing between two sampled curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub x: f64,
    /// Value of the first curve's local line at `x`.
    pub y: f64,
}

/// The last two sample indices seen for one curve.
#[derive(Debug, Default)]
struct ShiftRegister {
    slots: [usize; 2],
    count: usize,
}

impl ShiftRegister {
    fn push(&mut self, index: usize) {
        self.slots = [self.slots[1], index];
        self.count += 1;
    }

    fn is_full(&self) -> bool {
        self.count >= 2
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn points(&self, curve: &Curve) -> [(f64, f64); 2] {
        self.slots.map(|i| (curve.x[i], curve.y[i]))
    }
}

/// Finds the `x` locations where curve `a` crosses curve `b`.
///
/// The curves may be sampled at different `x` values. The union of both
/// sample sets is walked in ascending order while each curve keeps its last
/// two samples. Once both curves have two fresh samples, a strict sign change
/// of `a − b` between the older and newer pair marks a crossing: a line is
/// fitted through each curve's two samples and the root of their difference
/// is reported. Both curves then need two new samples before the next
/// crossing can be reported.
///
/// Equal values at a shared sample are not a crossing on their own, and
/// curves with fewer than two samples each never cross.
///
/// # Example
///
/// ```
/// use twine_refrigeration::support::curve::{Curve, intersections};
///
/// let a = Curve::from_points([(0.0, 0.0), (1.0, 2.0)]).unwrap();
/// let b = Curve::from_points([(0.0, 2.0), (1.0, 0.0)]).unwrap();
///
/// let crossings = intersections(&a, &b);
/// assert_eq!(crossings.len(), 1);
/// assert!((crossings[0].x - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn intersections(a: &Curve, b: &Curve) -> Vec<Intersection> {
    let mut merged: Vec<f64> = a.x.iter().chain(&b.x).copied().collect();
    merged.sort_by(f64::total_cmp);
    merged.dedup();

    let mut reg_a = ShiftRegister::default();
    let mut reg_b = ShiftRegister::default();
    let mut found = Vec::new();

    for x in merged {
        if let Some(i) = a.index_of(x) {
            reg_a.push(i);
        }
        if let Some(i) = b.index_of(x) {
            reg_b.push(i);
        }

        if !(reg_a.is_full() && reg_b.is_full()) {
            continue;
        }

        let [a0, a1] = reg_a.points(a);
        let [b0, b1] = reg_b.points(b);

        let flipped = (a0.1 > b0.1 && a1.1 < b1.1) || (a0.1 < b0.1 && a1.1 > b1.1);
        if !flipped {
            continue;
        }

        reg_a.reset();
        reg_b.reset();

        let (Some(line_a), Some(line_b)) = (Line::through(a0, a1), Line::through(b0, b1)) else {
            continue;
        };
        if let Some(x) = (line_a - line_b).root() {
            found.push(Intersection {
                x,
                y: line_a.eval(x),
            });
        }
    }

    found
}
