pub mod operator;
pub mod scene;

pub use operator::*;
pub use scene::*;
