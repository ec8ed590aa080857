pub use error::{Error, Result};
pub use manager::{render_manifest, ResourceManager};
pub use state::{ResourceState, StateMetadata};

mod error;
mod manager;
mod state;
