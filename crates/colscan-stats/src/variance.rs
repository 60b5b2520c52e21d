/// Single-pass mean and variance accumulator (Welford's algorithm).
///
/// Values are pushed one at a time; the running mean and the second-moment
/// accumulator are updated in a numerically stable way, so no second pass
/// over the data is needed.
///
/// # Examples
///
/// ```
/// # use colscan_stats::variance::OnlineVariance;
/// let acc = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
///     .into_iter()
///     .collect::<OnlineVariance>();
/// assert_eq!(acc.count(), 8);
/// assert_eq!(acc.mean(), Some(5.0));
/// assert_eq!(acc.population_variance(), Some(4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnlineVariance {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl OnlineVariance {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Adds one observation.
    #[expect(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Number of observations pushed so far.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Running mean, or `None` before the first observation.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Smallest observation, or `None` if empty.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest observation, or `None` if empty.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Sample variance with Bessel's correction (`m2 / (n - 1)`).
    ///
    /// Returns `None` when fewer than two observations were pushed, since the
    /// corrected estimator is undefined there.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Population variance (`m2 / n`), or `None` if empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    /// Square root of [`sample_variance`](Self::sample_variance).
    #[must_use]
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

impl Default for OnlineVariance {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<f64> for OnlineVariance {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = f64>,
    {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for OnlineVariance {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
