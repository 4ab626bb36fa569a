pub mod interval;
pub mod point;

pub use glam::{DVec2, DVec3, DVec4};
pub use interval::Interval;
pub use point::{ControlPoint, Linear};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
