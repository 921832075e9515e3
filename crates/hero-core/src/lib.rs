pub mod ambient;
pub mod carousel;
pub mod config;
pub mod draw;
pub mod easing;
pub mod error;
pub mod particle;
pub mod pool;
pub mod scanner;

pub use ambient::*;
pub use carousel::*;
pub use config::*;
pub use draw::{Blend, LinearGradient, Rect, Rgba, Surface};
pub use error::*;
pub use scanner::*;
