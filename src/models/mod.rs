pub mod kpi;
pub mod segments;
pub mod trip;

pub use kpi::*;
pub use segments::*;
pub use trip::*;
