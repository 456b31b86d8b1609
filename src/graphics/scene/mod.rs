pub mod frame;
pub mod lights;
pub mod material;
pub mod spatial_transform;
