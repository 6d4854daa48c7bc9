mod metric;
mod reading;

pub use metric::*;
pub use reading::*;
