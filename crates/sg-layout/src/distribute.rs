// ABOUTME: Constrained apportioning of one axis among sibling views.
// ABOUTME: Proportional container resizes and priority-driven explicit resizes.

/// Marker for an unbounded maximum.
pub const UNBOUNDED: u32 = u32::MAX;

/// Size bounds of one child along the axis being distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    /// Bounds with `max` raised to `min` when they cross.
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    pub const fn unbounded() -> Self {
        Self {
            min: 0,
            max: UNBOUNDED,
        }
    }

    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }

    /// Signed distance from `value` back into the bounds: positive above
    /// the maximum, negative below the minimum, zero inside.
    pub fn excess(&self, value: u32) -> i64 {
        let value = i64::from(value);
        if value > i64::from(self.max) {
            value - i64::from(self.max)
        } else if value < i64::from(self.min) {
            value - i64::from(self.min)
        } else {
            0
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// How a distribution pass weighs children when space is taken away.
/// Growth is always proportional to current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// Shrink proportionally to current size
    Size,
    /// Shrink proportionally to the slack each child has above its minimum
    Slack,
}

/// Whether a distribution reached its target.
///
/// Saturation is a normal outcome: constraints may make the target
/// unreachable, in which case `unresolved` pixels are left over
/// (positive when the children could not grow enough, negative when they
/// could not shrink enough).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fit {
    #[default]
    Exact,
    Saturated { unresolved: i64 },
}

impl Fit {
    fn from_remaining(remaining: i64) -> Self {
        if remaining == 0 {
            Fit::Exact
        } else {
            Fit::Saturated {
                unresolved: remaining,
            }
        }
    }

    pub fn is_saturated(&self) -> bool {
        matches!(self, Fit::Saturated { .. })
    }

    /// Combine two outcomes, keeping the first saturation seen.
    pub fn merge(self, other: Fit) -> Fit {
        if self.is_saturated() {
            self
        } else {
            other
        }
    }
}

/// Room a child has to move in `direction` (+1 grow, -1 shrink).
fn headroom(size: u32, bounds: Bounds, direction: i64) -> i64 {
    let room = if direction > 0 {
        i64::from(bounds.max) - i64::from(size)
    } else {
        i64::from(size) - i64::from(bounds.min)
    };
    room.max(0)
}

fn shift(size: &mut u32, direction: i64, amount: i64) {
    *size = (i64::from(*size) + direction * amount) as u32;
}

/// Pull children whose bounds changed under them back inside.
fn clamp_all(sizes: &mut [u32], bounds: &[Bounds]) {
    for (size, bounds) in sizes.iter_mut().zip(bounds) {
        *size = bounds.clamp(i64::from(*size));
    }
}

pub fn total(sizes: &[u32]) -> i64 {
    sizes.iter().map(|&s| i64::from(s)).sum()
}

/// Split `amount` by `weights`. Shares are floored and the leftover
/// pixels go one each to positively weighted entries in index order.
/// All-zero weights split equally, again leftovers first.
fn apportion(amount: u64, weights: &[u64]) -> Vec<u64> {
    let weight_total: u128 = weights.iter().map(|&w| u128::from(w)).sum();
    if weight_total == 0 {
        let n = weights.len() as u64;
        let base = amount / n;
        let extra = amount % n;
        return (0..n).map(|i| base + u64::from(i < extra)).collect();
    }

    let mut shares: Vec<u64> = weights
        .iter()
        .map(|&w| (u128::from(amount) * u128::from(w) / weight_total) as u64)
        .collect();
    let mut leftover = amount - shares.iter().sum::<u64>();
    for (share, &w) in shares.iter_mut().zip(weights) {
        if leftover == 0 {
            break;
        }
        if w > 0 {
            *share += 1;
            leftover -= 1;
        }
    }
    shares
}

/// Spread `remaining` over `indexes`, re-spreading whatever clamped
/// children could not take. Returns what is still unresolved.
fn spread(
    sizes: &mut [u32],
    bounds: &[Bounds],
    indexes: &[usize],
    mut remaining: i64,
    weighting: Weighting,
) -> i64 {
    let direction = remaining.signum();
    let mut flexible: Vec<usize> = indexes
        .iter()
        .copied()
        .filter(|&i| headroom(sizes[i], bounds[i], direction) > 0)
        .collect();

    // Zero-sized children have no proportional weight; they take their
    // equal share up front.
    if direction > 0 && !flexible.is_empty() {
        let share = remaining / flexible.len() as i64;
        for &i in &flexible {
            if sizes[i] == 0 {
                let take = share.min(headroom(sizes[i], bounds[i], direction));
                shift(&mut sizes[i], direction, take);
                remaining -= direction * take;
            }
        }
    }

    while remaining != 0 {
        flexible.retain(|&i| headroom(sizes[i], bounds[i], direction) > 0);
        if flexible.is_empty() {
            break;
        }

        let weights: Vec<u64> = flexible
            .iter()
            .map(|&i| match weighting {
                Weighting::Slack if direction < 0 => u64::from(sizes[i] - bounds[i].min),
                _ => u64::from(sizes[i]),
            })
            .collect();
        let shares = apportion(remaining.unsigned_abs(), &weights);

        for (&i, share) in flexible.iter().zip(shares) {
            let take = (share as i64).min(headroom(sizes[i], bounds[i], direction));
            shift(&mut sizes[i], direction, take);
            remaining -= direction * take;
        }
    }

    remaining
}

/// Resize children so their sizes sum to `target`.
///
/// Every child except `low_priority` absorbs the difference first; the
/// low priority child (a freshly inserted view, say) is only touched once
/// the others are pinned at their bounds.
pub fn distribute(
    sizes: &mut [u32],
    bounds: &[Bounds],
    target: u32,
    low_priority: Option<usize>,
    weighting: Weighting,
) -> Fit {
    debug_assert_eq!(sizes.len(), bounds.len());

    clamp_all(sizes, bounds);
    let mut remaining = i64::from(target) - total(sizes);
    if remaining == 0 {
        return Fit::Exact;
    }

    let (regular, deferred): (Vec<usize>, Vec<usize>) =
        (0..sizes.len()).partition(|&i| Some(i) != low_priority);
    for group in [regular, deferred] {
        if remaining == 0 {
            break;
        }
        remaining = spread(sizes, bounds, &group, remaining, weighting);
    }

    Fit::from_remaining(remaining)
}

/// Resize children so their sizes sum to `target`, taking the whole
/// difference from the last child backwards. Earlier children keep their
/// sizes unless every later child is pinned.
pub fn absorb_from_end(sizes: &mut [u32], bounds: &[Bounds], target: u32) -> Fit {
    debug_assert_eq!(sizes.len(), bounds.len());

    clamp_all(sizes, bounds);
    let mut remaining = i64::from(target) - total(sizes);
    let direction = remaining.signum();
    for i in (0..sizes.len()).rev() {
        if remaining == 0 {
            break;
        }
        let take = remaining.abs().min(headroom(sizes[i], bounds[i], direction));
        shift(&mut sizes[i], direction, take);
        remaining -= direction * take;
    }

    Fit::from_remaining(remaining)
}

/// Change child `index` by `delta`, trading the opposite amount with its
/// neighbours: the following siblings nearest first, or the preceding
/// ones when `index` is the last child. The sum of `sizes` is unchanged.
///
/// Returns the realized delta, smaller in magnitude than `delta` when the
/// child or its neighbours hit their bounds.
pub fn resize_with_priority(sizes: &mut [u32], bounds: &[Bounds], index: usize, delta: i64) -> i64 {
    debug_assert_eq!(sizes.len(), bounds.len());
    if index >= sizes.len() || delta == 0 {
        return 0;
    }

    let direction = delta.signum();
    let cascade: Vec<usize> = if index + 1 < sizes.len() {
        (index + 1..sizes.len()).collect()
    } else {
        (0..index).rev().collect()
    };

    let own = headroom(sizes[index], bounds[index], direction);
    let donors: i64 = cascade
        .iter()
        .map(|&i| headroom(sizes[i], bounds[i], -direction))
        .sum();
    let realized = delta.abs().min(own).min(donors);

    shift(&mut sizes[index], direction, realized);
    let mut owed = realized;
    for i in cascade {
        if owed == 0 {
            break;
        }
        let take = owed.min(headroom(sizes[i], bounds[i], -direction));
        shift(&mut sizes[i], -direction, take);
        owed -= take;
    }

    direction * realized
}
