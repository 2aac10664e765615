pub mod camera;
pub mod portal;
pub mod scene;
pub mod weather;
