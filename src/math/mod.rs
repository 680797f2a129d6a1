mod aabb;
mod sampling;

pub use aabb::AABB;
pub use sampling::Interval;
