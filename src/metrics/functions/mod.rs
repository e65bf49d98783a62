pub mod sum_metric;
pub use sum_metric::*;

pub mod count_metric;
pub use count_metric::*;

pub mod extrema_metric;
pub use extrema_metric::*;

pub mod mean_metric;
pub use mean_metric::*;
