pub mod config;
pub mod consts;
pub mod dual;
pub mod error;
pub mod geometry;
pub mod io;
pub mod navigation;
pub mod render;
pub mod session;
pub mod store;
pub mod surface;
pub mod viewport;
