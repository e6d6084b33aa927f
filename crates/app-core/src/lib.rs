pub mod constants;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod hand;
pub mod interaction;
pub mod reaction;
pub mod scene;
pub mod scheduler;
pub mod session;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use constants::*;
pub use error::*;
pub use geometry::*;
pub use gesture::*;
pub use hand::*;
pub use interaction::*;
pub use reaction::*;
pub use scene::*;
pub use scheduler::*;
pub use session::*;
