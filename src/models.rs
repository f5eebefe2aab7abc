pub mod attribute;
pub mod device;
pub mod disc_info;
pub mod mkv;
pub mod mkv_options;
pub mod stream_info;
pub mod title_info;
