pub mod asset;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod filter;
pub mod input;
pub mod interaction;
pub mod mesh;
pub mod model;
pub mod placeholder;
pub mod scene;
pub mod state;
pub mod viewer;

pub use catalog::{CatalogStore, Measure, ProductRecord};
pub use error::{AssetError, CatalogError};
pub use filter::{filter, Brand, BrandFilter, FilterCriteria, FilteredView};
pub use input::{InputEvent, InputQueue};
pub use interaction::{InteractionController, InteractionMode, InteractionState, Orbit};
pub use mesh::{LineVertex, MeshData, Vertex};
pub use model::{ModelDescriptor, ModelResolver, Resolution};
pub use scene::{FrameDescription, MeshHandle, ResolveRequest, ResolveTicket, SceneRenderer, Surface};
pub use state::Camera;
pub use viewer::{Showroom, ShowroomParams, ViewerSession};
