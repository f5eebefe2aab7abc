pub mod disc_info_builder;
pub mod makemkvcon;
pub mod makemkvcon_parser;
pub mod progress_relay;
pub mod stream_index;
