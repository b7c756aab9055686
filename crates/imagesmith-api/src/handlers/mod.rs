pub mod process_image;
