pub mod generator;
pub mod pools;
pub mod render;
pub mod template;
