mod builder;
mod descriptor;
mod style;
mod title;

pub use builder::*;
pub use descriptor::*;
pub use style::*;
pub use title::*;
