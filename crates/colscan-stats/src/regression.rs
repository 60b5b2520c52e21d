//! Polynomial least-squares regression with degree selection.
//!
//! The entry point is the [`Regressor`] trait: given sample positions, sample
//! values and a maximum degree it chooses a polynomial degree and reports the
//! residual error of that fit. [`LeastSquaresRegressor`] is the bundled
//! implementation; any closure with the matching signature is a regressor as
//! well, which lets callers swap the fitting strategy.

/// Errors raised while fitting a polynomial.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum RegressionError {
    #[display("cannot fit a polynomial to an empty sample")]
    EmptyInput,
    #[display("positions and values differ in length ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },
    #[display("normal equations are singular for degree {degree}")]
    Singular { degree: usize },
}

/// A fitted polynomial.
///
/// Coefficients are stored in ascending order of power and apply to the
/// normalized position `t = (x - offset) / scale`, which keeps the normal
/// equations well conditioned for large positions.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    /// Degree of the fitted polynomial.
    pub degree: usize,
    /// Coefficients for `t^0, t^1, ..., t^degree`.
    pub coefficients: Vec<f64>,
    /// Position subtracted before scaling.
    pub offset: f64,
    /// Divisor applied after subtracting `offset`.
    pub scale: f64,
    /// Sum of squared residuals of the fit.
    pub residual: f64,
}

impl PolynomialFit {
    /// Evaluates the polynomial at position `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use colscan_stats::regression::fit_polynomial;
    /// let x = [0.0, 1.0, 2.0, 3.0];
    /// let y = [1.0, 3.0, 5.0, 7.0];
    /// let fit = fit_polynomial(&x, &y, 1).unwrap();
    /// assert!((fit.evaluate(10.0) - 21.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let t = (x - self.offset) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc.mul_add(t, c))
    }
}

/// Strategy that picks a polynomial degree for a sample and reports its fit.
///
/// Implementations must return a residual of exactly `0.0` for a single
/// sample (a constant fits one point exactly) and must reject empty input.
pub trait Regressor {
    /// Fits `y` against `x` with a degree no greater than `max_degree`.
    fn fit(&self, x: &[f64], y: &[f64], max_degree: usize)
    -> Result<PolynomialFit, RegressionError>;
}

impl<F> Regressor for F
where
    F: Fn(&[f64], &[f64], usize) -> Result<PolynomialFit, RegressionError>,
{
    fn fit(
        &self,
        x: &[f64],
        y: &[f64],
        max_degree: usize,
    ) -> Result<PolynomialFit, RegressionError> {
        self(x, y, max_degree)
    }
}

/// Ordinary least squares over every candidate degree.
///
/// Degrees are tried from 0 upwards. A higher degree replaces the current
/// best only when it shrinks the residual by more than `min_improvement`
/// (relative), so exact low-degree data keeps its low degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquaresRegressor {
    /// Relative residual reduction required to accept a higher degree.
    pub min_improvement: f64,
}

impl LeastSquaresRegressor {
    pub const DEFAULT_MIN_IMPROVEMENT: f64 = 1e-9;

    #[must_use]
    pub const fn new(min_improvement: f64) -> Self {
        Self { min_improvement }
    }
}

impl Default for LeastSquaresRegressor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_IMPROVEMENT)
    }
}

impl Regressor for LeastSquaresRegressor {
    fn fit(
        &self,
        x: &[f64],
        y: &[f64],
        max_degree: usize,
    ) -> Result<PolynomialFit, RegressionError> {
        check_sample(x, y)?;

        // n points determine at most a degree n-1 polynomial
        let max_degree = max_degree.min(x.len() - 1);
        let mut best = fit_polynomial(x, y, 0)?;
        for degree in 1..=max_degree {
            let candidate = match fit_polynomial(x, y, degree) {
                Ok(fit) => fit,
                Err(RegressionError::Singular { .. }) => break,
                Err(e) => return Err(e),
            };
            if candidate.residual < best.residual * (1.0 - self.min_improvement) {
                best = candidate;
            }
        }
        Ok(best)
    }
}

fn check_sample(x: &[f64], y: &[f64]) -> Result<(), RegressionError> {
    if x.len() != y.len() {
        return Err(RegressionError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(RegressionError::EmptyInput);
    }
    Ok(())
}

/// Fits a polynomial of exactly `degree` by least squares.
///
/// Solves the normal equations with Gaussian elimination and partial
/// pivoting. Fails with [`RegressionError::Singular`] when the sample cannot
/// determine that many coefficients.
///
/// # Examples
///
/// ```
/// # use colscan_stats::regression::fit_polynomial;
/// let fit = fit_polynomial(&[0.0, 1.0, 2.0], &[4.0, 4.0, 4.0], 0).unwrap();
/// assert_eq!(fit.degree, 0);
/// assert_eq!(fit.residual, 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn fit_polynomial(
    x: &[f64],
    y: &[f64],
    degree: usize,
) -> Result<PolynomialFit, RegressionError> {
    check_sample(x, y)?;
    if degree >= x.len() {
        return Err(RegressionError::Singular { degree });
    }

    let n = x.len() as f64;
    let offset = x.iter().sum::<f64>() / n;
    let spread = x
        .iter()
        .map(|v| (v - offset).abs())
        .fold(0.0, f64::max);
    let scale = if spread > 0.0 { spread } else { 1.0 };
    let t = x.iter().map(|v| (v - offset) / scale).collect::<Vec<_>>();

    let size = degree + 1;
    // power_sums[k] = sum of t^k, k in 0..=2*degree
    let mut power_sums = vec![0.0; 2 * degree + 1];
    let mut moments = vec![0.0; size];
    for (&ti, &yi) in t.iter().zip(y) {
        let mut p = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += p;
            if k < size {
                moments[k] += yi * p;
            }
            p *= ti;
        }
    }

    // Augmented matrix [A | b]
    let mut matrix = (0..size)
        .map(|row| {
            let mut r = power_sums[row..row + size].to_vec();
            r.push(moments[row]);
            r
        })
        .collect::<Vec<_>>();
    let coefficients = solve(&mut matrix, n).ok_or(RegressionError::Singular { degree })?;

    let mut fit = PolynomialFit {
        degree,
        coefficients,
        offset,
        scale,
        residual: 0.0,
    };
    fit.residual = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (yi - fit.evaluate(xi)).powi(2))
        .sum();
    Ok(fit)
}

/// Solves an augmented linear system in place; `None` if it is singular.
fn solve(matrix: &mut [Vec<f64>], magnitude: f64) -> Option<Vec<f64>> {
    let size = matrix.len();
    let tolerance = 1e-12 * magnitude.max(1.0);

    for col in 0..size {
        let pivot_row = (col..size).max_by(|&a, &b| {
            f64::total_cmp(&matrix[a][col].abs(), &matrix[b][col].abs())
        })?;
        if matrix[pivot_row][col].abs() <= tolerance {
            return None;
        }
        matrix.swap(col, pivot_row);

        let pivot = matrix[col].clone();
        for row in &mut matrix[col + 1..] {
            let factor = row[col] / pivot[col];
            for (value, p) in row[col..].iter_mut().zip(&pivot[col..]) {
                *value -= factor * p;
            }
        }
    }

    let mut solution = vec![0.0; size];
    for row in (0..size).rev() {
        let tail = (row + 1..size)
            .map(|k| matrix[row][k] * solution[k])
            .sum::<f64>();
        solution[row] = (matrix[row][size] - tail) / matrix[row][row];
    }
    Some(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(n: u32) -> Vec<f64> {
        (0..n).map(f64::from).collect()
    }

    #[test]
    fn test_single_point_is_exact() {
        let fit = LeastSquaresRegressor::default()
            .fit(&[7.0], &[200.0], 1)
            .unwrap();
        assert_eq!(fit.degree, 0);
        assert_eq!(fit.residual, 0.0);
    }

    #[test]
    fn test_single_point_ignores_higher_max_degree() {
        let fit = LeastSquaresRegressor::default()
            .fit(&[3.0], &[17.0], 4)
            .unwrap();
        assert_eq!(fit.degree, 0);
        assert_eq!(fit.residual, 0.0);
    }

    #[test]
    fn test_constant_prefers_degree_zero() {
        let x = positions(5);
        let y = [9.0; 5];
        let fit = LeastSquaresRegressor::default().fit(&x, &y, 1).unwrap();
        assert_eq!(fit.degree, 0);
        assert_eq!(fit.residual, 0.0);
    }

    #[test]
    fn test_exact_line() {
        let x = positions(6);
        let y = x.iter().map(|v| 3.0 * v + 2.0).collect::<Vec<_>>();
        let fit = LeastSquaresRegressor::default().fit(&x, &y, 1).unwrap();
        assert_eq!(fit.degree, 1);
        assert!(fit.residual < 1e-18, "residual {}", fit.residual);
        assert!((fit.evaluate(10.0) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_capped_to_constant() {
        let x = positions(4);
        let y = [0.0, 1.0, 2.0, 3.0];
        let fit = LeastSquaresRegressor::default().fit(&x, &y, 0).unwrap();
        assert_eq!(fit.degree, 0);
        // deviations from the mean 1.5
        assert!((fit.residual - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_quadratic_needs_degree_two() {
        let x = positions(7);
        let y = x.iter().map(|v| v * v).collect::<Vec<_>>();

        let linear = LeastSquaresRegressor::default().fit(&x, &y, 1).unwrap();
        assert_eq!(linear.degree, 1);
        assert!(linear.residual > 1.0);

        let quadratic = LeastSquaresRegressor::default().fit(&x, &y, 2).unwrap();
        assert_eq!(quadratic.degree, 2);
        assert!(quadratic.residual < 1e-12);
    }

    #[test]
    fn test_offset_positions() {
        let x = (1000..1010).map(f64::from).collect::<Vec<_>>();
        let y = x.iter().map(|v| 0.5 * v - 400.0).collect::<Vec<_>>();
        let fit = LeastSquaresRegressor::default().fit(&x, &y, 1).unwrap();
        assert_eq!(fit.degree, 1);
        assert!(fit.residual < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        let err = LeastSquaresRegressor::default()
            .fit(&[], &[], 1)
            .unwrap_err();
        assert_eq!(err, RegressionError::EmptyInput);
    }

    #[test]
    fn test_length_mismatch() {
        let err = fit_polynomial(&[0.0, 1.0], &[1.0], 0).unwrap_err();
        assert_eq!(err, RegressionError::LengthMismatch { x: 2, y: 1 });
    }

    #[test]
    fn test_underdetermined_degree() {
        let err = fit_polynomial(&[0.0, 1.0], &[1.0, 2.0], 2).unwrap_err();
        assert_eq!(err, RegressionError::Singular { degree: 2 });
    }

    #[test]
    fn test_repeated_positions_are_singular() {
        let err = fit_polynomial(&[2.0, 2.0, 2.0], &[1.0, 5.0, 9.0], 1).unwrap_err();
        assert_eq!(err, RegressionError::Singular { degree: 1 });
    }

    #[test]
    fn test_closure_regressor() {
        let always_flat = |x: &[f64], y: &[f64], _max: usize| fit_polynomial(x, y, 0);
        let fit = always_flat.fit(&positions(3), &[1.0, 2.0, 3.0], 1).unwrap();
        assert_eq!(fit.degree, 0);
        assert!((fit.residual - 2.0).abs() < 1e-12);
    }
}
