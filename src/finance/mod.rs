//! Financial return metrics for energy-efficiency investments.

mod roi;

pub use roi::{
    calculate_roi, internal_rate_of_return, net_present_value, RoiResult, DEFAULT_DISCOUNT_RATE,
    IRR_LOWER_BOUND, IRR_MAX_ITERATIONS, IRR_TOLERANCE, IRR_UPPER_BOUND,
};
