pub mod bindings;
pub mod constants;
pub mod gpu;
pub mod layout;
pub mod scene;
pub mod schema;
pub mod vertex;
pub mod wgsl;
