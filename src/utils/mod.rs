//! Shared numeric helpers.

pub mod ols;
pub mod stats;

pub use ols::{
    index_regression, simple_linear_regression, two_variable_regression, LinearFit,
    TwoVariableFit,
};
pub use stats::{autocorrelation, mean, pearson_correlation, population_variance, safe_divide, std_dev};
