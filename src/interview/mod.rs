pub mod engine;
pub mod questions;
pub mod answers;
pub mod timer;
pub mod scoring;

pub use engine::*;
pub use questions::*;
pub use answers::*;
pub use timer::*;
pub use scoring::*;
