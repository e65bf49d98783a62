pub mod metric;
pub use metric::*;

pub mod metric_identity;
pub use metric_identity::*;

pub mod metric_value;
pub use metric_value::*;

pub mod metric_error;
pub use metric_error::*;

pub mod explanation;
pub use explanation::*;

pub mod metric_registry;
pub use metric_registry::*;

pub mod functions;
pub use functions::*;
