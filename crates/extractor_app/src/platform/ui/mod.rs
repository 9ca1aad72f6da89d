pub mod constants;
pub mod frame;
pub mod input;
pub mod layout;
pub mod render;
