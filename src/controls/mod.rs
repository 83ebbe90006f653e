pub mod keys;
pub mod orbit;

pub use keys::{action_for_key, ViewerAction};
pub use orbit::OrbitControls;
