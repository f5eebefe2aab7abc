use crate::models::device::Device;
use crate::models::disc_info::DiscInfo;
use crate::models::mkv::Status;
use crate::models::mkv_options::MkvOptions;
use crate::services::makemkvcon_parser;
use crate::services::progress_relay::{relay_progress, ProgressRelay, StatusReceiver};
use crate::standard_error::StandardError;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::watch;

// makemkvcon [options] Command Parameters
// https://www.makemkv.com/developers/usage.txt
//
// Robot mode (-r) output is line based and flushed on line end:
//
//   TCOUNT:count                 titles on the disc
//   CINFO:id,code,value          disc attribute
//   TINFO:title,id,code,value    title attribute
//   SINFO:title,stream,id,code,value
//   PRGT:code,id,name            total progress title
//   PRGC:code,id,name            current progress title
//   PRGV:current,total,max       progress bar values
//   MSG:code,flags,count,message,format,param0,...
//   DRV:index,visible,enabled,flags,drive name,disc name
//
// Attribute ids are AP_ItemAttributeId from apdefs.h, see AttributeId.

/// Which titles `makemkvcon mkv` should save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSelection {
    Id(u32),
    All,
}

impl TitleSelection {
    fn as_arg(&self) -> String {
        match self {
            TitleSelection::Id(id) => id.to_string(),
            TitleSelection::All => "all".to_string(),
        }
    }
}

/// Runs `makemkvcon info` against `device` and parses what it reports.
pub async fn title_info(device: &Device, options: &MkvOptions) -> Result<DiscInfo, StandardError> {
    let mut args = options.to_args();
    args.push("info".to_string());
    args.push(device.to_string());
    debug!("Executing command: {} {args:?}", options.program().display());

    let output = Command::new(options.program())
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .await?;
    check_exit(output.status, &String::from_utf8_lossy(&output.stderr))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let disc_info = makemkvcon_parser::parse_disc_info(&stdout);
    debug!(
        "Parsed {} titles from {device} ({})",
        disc_info.titles.len(),
        disc_info.name
    );
    Ok(disc_info)
}

/// A `makemkvcon mkv` rip. Progress is published while it runs; call
/// [`MkvJob::subscribe`] before [`MkvJob::run`] to watch it.
pub struct MkvJob {
    device: Device,
    title: TitleSelection,
    destination: PathBuf,
    options: MkvOptions,
    status_sender: watch::Sender<Option<Status>>,
}

impl MkvJob {
    pub fn new(
        device: Device,
        title: TitleSelection,
        destination: impl AsRef<Path>,
        options: MkvOptions,
    ) -> Self {
        let (status_sender, _) = watch::channel(None);
        Self {
            device,
            title,
            destination: destination.as_ref().to_path_buf(),
            options: options.with_progress(),
            status_sender,
        }
    }

    pub fn subscribe(&self) -> StatusReceiver {
        self.status_sender.subscribe()
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = self.options.to_args();
        args.push("mkv".to_string());
        args.push(self.device.to_string());
        args.push(self.title.as_arg());
        args.push(self.destination.to_string_lossy().to_string());
        args
    }

    /// Spawns makemkvcon and relays its progress until stdout closes, then
    /// waits for it. A non-zero exit is an error.
    pub async fn run(self) -> Result<(), StandardError> {
        let args = self.args();
        debug!("Executing command: {} {args:?}", self.options.program().display());

        let mut child = Command::new(self.options.program())
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| StandardError::new("Rip".to_string(), "no stdout pipe".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| StandardError::new("Rip".to_string(), "no stderr pipe".to_string()))?;

        let mut relay = ProgressRelay::with_sink(self.status_sender);
        let reader = tokio::spawn(async move {
            relay_progress(BufReader::new(stdout), &mut relay).await
        });
        let stderr_reader = tokio::spawn(async move {
            let mut text = String::new();
            stderr.read_to_string(&mut text).await.map(|_| text)
        });

        let relayed = join_task(reader).await?;
        let stderr_text = join_task(stderr_reader).await.unwrap_or_default();
        let status = child.wait().await?;
        debug!("makemkvcon finished with {status} after {relayed} progress updates");
        check_exit(status, &stderr_text)
    }
}

async fn join_task<T>(
    handle: tokio::task::JoinHandle<std::io::Result<T>>,
) -> Result<T, StandardError> {
    match handle.await {
        Ok(result) => Ok(result?),
        Err(e) => Err(StandardError::new(
            "Rip".to_string(),
            format!("output reader stopped: {e}"),
        )),
    }
}

fn check_exit(status: ExitStatus, stderr: &str) -> Result<(), StandardError> {
    if status.success() {
        Ok(())
    } else {
        Err(StandardError::process_failed(status.code(), stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mkv_job_args() {
        let options = MkvOptions {
            cache: Some(1024),
            minlength: Some(45),
            noscan: true,
            ..Default::default()
        };
        let job = MkvJob::new(Device::Disc(0), TitleSelection::Id(3), "/tmp/rip", options);
        assert_eq!(
            job.args(),
            vec![
                "-r",
                "--progress=-same",
                "--cache=1024",
                "--minlength=45",
                "--noscan",
                "mkv",
                "disc:0",
                "3",
                "/tmp/rip",
            ]
        );
    }

    #[test]
    fn test_all_titles_arg() {
        let job = MkvJob::new(
            Device::Dev("sr0".to_string()),
            TitleSelection::All,
            "/tmp/rip",
            MkvOptions::default(),
        );
        let args = job.args();
        assert_eq!(&args[args.len() - 3..], ["dev:/dev/sr0", "all", "/tmp/rip"]);
    }

    #[test]
    fn test_subscribe_starts_empty() {
        let job = MkvJob::new(
            Device::Disc(0),
            TitleSelection::All,
            "/tmp/rip",
            MkvOptions::default(),
        );
        let receiver = job.subscribe();
        assert_eq!(*receiver.borrow(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_executable_is_an_error() {
        let options = MkvOptions {
            executable: Some(PathBuf::from("/nonexistent/makemkvcon")),
            ..Default::default()
        };
        let result = title_info(&Device::Disc(0), &options).await;
        assert_eq!(result.unwrap_err().title, "I/O error");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_fails_job() {
        let options = MkvOptions {
            executable: Some(PathBuf::from("false")),
            ..Default::default()
        };
        let job = MkvJob::new(Device::Disc(0), TitleSelection::All, "/tmp", options);
        let error = job.run().await.unwrap_err();
        assert_eq!(error.title, "makemkvcon failed");
        assert!(error.message.starts_with("makemkvcon exited with 1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_exit() {
        let options = MkvOptions {
            executable: Some(PathBuf::from("true")),
            ..Default::default()
        };
        let disc = title_info(&Device::Disc(0), &options).await.unwrap();
        assert!(disc.titles.is_empty());
    }
}
