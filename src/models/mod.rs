//! Forecasting models.

mod forecast;

pub use forecast::{
    calculate_linear_regression_slope, forecast, generate_linear_forecast,
    generate_linear_forecast_with_level, generate_simple_forecast, DEFAULT_CONFIDENCE_LEVEL,
    SIMPLE_FORECAST_WINDOW,
};
