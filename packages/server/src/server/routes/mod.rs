// HTTP routes
pub mod health;
pub mod taste;

pub use health::*;
pub use taste::*;
