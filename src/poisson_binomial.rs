//! Poisson binomial distribution
//!
//! Distribution of the number of successes among independent Bernoulli trials
//! with individual success probabilities. The probability mass function is
//! built by convolving one trial at a time; every update is a convex
//! combination of non-negative values, so the recurrence stays stable for
//! thousands of trials.

/// Distribution of the sum of independent, non-identical Bernoulli trials
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonBinomial {
    /// `pmf[k] = P(X = k)` for `k = 0..=n`
    pmf: Vec<f64>,
    /// `cdf[k] = P(X <= k)` for `k = 0..=n`
    cdf: Vec<f64>,
    mean: f64,
}

impl PoissonBinomial {
    /// Build the distribution from per-trial success probabilities
    ///
    /// Probabilities outside `[0, 1]` are clamped into it.
    ///
    /// # Example
    /// ```
    /// use aimtp::poisson_binomial::PoissonBinomial;
    ///
    /// let dist = PoissonBinomial::new(&[0.5, 0.5]);
    /// assert_eq!(dist.pmf(1), 0.5);
    /// assert_eq!(dist.cdf(0.7), 0.25);
    /// ```
    pub fn new(probabilities: &[f64]) -> Self {
        let n = probabilities.len();
        let mut pmf = vec![0.0; n + 1];
        pmf[0] = 1.0;

        for (trials, &p) in probabilities.iter().enumerate() {
            let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
            let q = 1.0 - p;
            // Walk downward so pmf[k - 1] still holds the previous round
            for k in (1..=trials + 1).rev() {
                pmf[k] = pmf[k] * q + pmf[k - 1] * p;
            }
            pmf[0] *= q;
        }

        let mut running = 0.0;
        let cdf = pmf
            .iter()
            .map(|&mass| {
                running += mass;
                running.min(1.0)
            })
            .collect();

        let mean = probabilities
            .iter()
            .map(|&p| if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) })
            .sum();

        Self { pmf, cdf, mean }
    }

    /// Number of trials
    pub fn len(&self) -> usize {
        self.pmf.len() - 1
    }

    /// True when the distribution has no trials
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expected number of successes
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// `P(X = k)`
    pub fn pmf(&self, k: usize) -> f64 {
        self.pmf.get(k).copied().unwrap_or(0.0)
    }

    /// `P(X <= k)`, with real `k` floored
    pub fn cdf(&self, k: f64) -> f64 {
        if k.is_nan() || k < 0.0 {
            return 0.0;
        }

        let index = k.floor();
        if index >= self.len() as f64 {
            return 1.0;
        }

        self.cdf[index as usize]
    }
}
