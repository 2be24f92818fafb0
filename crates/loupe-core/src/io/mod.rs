pub mod image_io;

pub use image_io::{open_surface, save_image, FsLoader, ImageLoader};
