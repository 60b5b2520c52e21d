//! Numeric primitives for the colscan column analyzer.
//!
//! - [`variance`]: single-pass (Welford) mean and variance accumulator
//! - [`regression`]: polynomial least squares with degree selection, behind the
//!   injectable [`regression::Regressor`] trait
//!
//! # Examples
//!
//! ## Sample variance in one pass
//!
//! ```
//! use colscan_stats::variance::OnlineVariance;
//!
//! let acc = [1.0, 2.0, 3.0, 4.0].into_iter().collect::<OnlineVariance>();
//! assert_eq!(acc.mean(), Some(2.5));
//! assert!((acc.sample_variance().unwrap() - 5.0 / 3.0).abs() < 1e-12);
//! ```
//!
//! ## Choosing a polynomial degree
//!
//! ```
//! use colscan_stats::regression::{LeastSquaresRegressor, Regressor};
//!
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [10.0, 12.0, 14.0, 16.0];
//! let fit = LeastSquaresRegressor::default().fit(&x, &y, 1).unwrap();
//! assert_eq!(fit.degree, 1);
//! assert!(fit.residual < 1e-12);
//! ```

pub mod regression;
pub mod variance;
