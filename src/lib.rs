//! Reads makemkvcon's robot-mode (`-r`) output.
//!
//! `makemkvcon info` output becomes a [`DiscInfo`] tree of titles and their
//! video, audio and subtitle streams. `makemkvcon mkv` rips are supervised by
//! [`MkvJob`], which publishes [`Status`] snapshots as progress lines arrive.
//!
//! The crate logs through the `log` facade and leaves picking a logger to the
//! embedding application.

pub mod models;
pub mod services;
pub mod standard_error;

pub use models::device::Device;
pub use models::disc_info::DiscInfo;
pub use models::mkv::Status;
pub use models::mkv_options::MkvOptions;
pub use models::stream_info::{AudioStreamInfo, StreamKind, SubtitleStreamInfo, VideoStreamInfo};
pub use models::title_info::TitleInfo;
pub use services::makemkvcon::{title_info, MkvJob, TitleSelection};
pub use services::makemkvcon_parser::{parse_disc_info, parse_disc_info_from};
pub use services::progress_relay::{relay_progress, ProgressRelay, StatusReceiver};
pub use standard_error::StandardError;
