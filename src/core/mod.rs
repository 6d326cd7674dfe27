pub mod polyline;
pub mod spring;
pub mod units;
pub mod viewport;

pub use polyline::{PathId, PointMm, Polyline};
pub use spring::{MAX_SAMPLE_COUNT, SpringSpec, generate_spring_path};
pub use units::{Axis, DefaultUnit, LengthUnit, UnitScope, UnitValue};
pub use viewport::{ViewportContext, ViewportVersion};
