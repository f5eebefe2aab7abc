use crate::models::mkv::{MkvData, Status};
use crate::services::makemkvcon_parser::decode_line;
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;

/// Receiving end of a rip's progress. Holds only the latest snapshot;
/// `None` until the first PRGV arrives.
pub type StatusReceiver = watch::Receiver<Option<Status>>;

/// Turns PRGT/PRGC/PRGV records into `Status` snapshots.
///
/// Labels from PRGT (title) and PRGC (channel) stick until replaced, every
/// PRGV produces one snapshot. Snapshots go to a single-slot channel that is
/// overwritten on each send, so a slow or missing reader never holds up the
/// rip; it just sees the most recent state when it looks.
#[derive(Debug, Default)]
pub struct ProgressRelay {
    title: String,
    channel: String,
    sink: Option<watch::Sender<Option<Status>>>,
}

impl ProgressRelay {
    /// A relay that publishes nowhere. `apply` still returns each snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: watch::Sender<Option<Status>>) -> Self {
        Self {
            sink: Some(sink),
            ..Default::default()
        }
    }

    pub fn channel() -> (Self, StatusReceiver) {
        let (sender, receiver) = watch::channel(None);
        (Self::with_sink(sender), receiver)
    }

    pub fn apply(&mut self, record: MkvData) -> Option<Status> {
        match record {
            MkvData::PRGT(prgt) => {
                self.title = prgt.name;
                None
            }
            MkvData::PRGC(prgc) => {
                self.channel = prgc.name;
                None
            }
            MkvData::PRGV(prgv) => {
                let status = Status {
                    title: self.title.clone(),
                    channel: self.channel.clone(),
                    current: prgv.current,
                    total: prgv.total,
                    max: prgv.pmax,
                };
                self.publish(&status);
                Some(status)
            }
            MkvData::MSG(msg) => {
                debug!("makemkvcon message {}: {}", msg.code, msg.message);
                None
            }
            _ => None,
        }
    }

    pub fn feed_line(&mut self, line: &str) -> Option<Status> {
        decode_line(line).and_then(|record| self.apply(record))
    }

    fn publish(&self, status: &Status) {
        if let Some(sink) = &self.sink {
            sink.send_replace(Some(status.clone()));
        }
    }
}

/// Reads `reader` line by line until end of output, feeding each line to
/// `relay`. Returns how many snapshots were produced.
pub async fn relay_progress<R>(reader: R, relay: &mut ProgressRelay) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut snapshots = 0;
    while let Some(line) = lines.next_line().await? {
        if relay.feed_line(&line).is_some() {
            snapshots += 1;
        }
    }
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_snapshot() {
        let mut relay = ProgressRelay::new();
        assert_eq!(relay.feed_line("PRGT:5018,0,\"Copying\""), None);
        assert_eq!(relay.feed_line("PRGC:5017,0,\"Title 1\""), None);
        assert_eq!(
            relay.feed_line("PRGV:10,100,100"),
            Some(Status {
                title: "Copying".to_string(),
                channel: "Title 1".to_string(),
                current: 10,
                total: 100,
                max: 100,
            })
        );
    }

    #[test]
    fn test_labels_persist_between_values() {
        let mut relay = ProgressRelay::new();
        relay.feed_line("PRGT:5018,0,\"Copying\"");
        relay.feed_line("PRGC:5017,0,\"Title 1\"");
        relay.feed_line("PRGV:10,100,100");
        let second = relay.feed_line("PRGV:20,150,100").unwrap();
        assert_eq!(second.title, "Copying");
        assert_eq!(second.channel, "Title 1");
        assert_eq!(second.current, 20);
        assert_eq!(second.total, 150);

        relay.feed_line("PRGC:5019,1,\"Title 2\"");
        let third = relay.feed_line("PRGV:0,150,100").unwrap();
        assert_eq!(third.title, "Copying");
        assert_eq!(third.channel, "Title 2");
    }

    #[test]
    fn test_values_before_labels() {
        let mut relay = ProgressRelay::new();
        let status = relay.feed_line("PRGV:1,2,3").unwrap();
        assert_eq!(status.title, "");
        assert_eq!(status.channel, "");
    }

    #[test]
    fn test_ignores_other_records() {
        let mut relay = ProgressRelay::new();
        assert_eq!(relay.feed_line("TINFO:0,2,0,\"Name\""), None);
        assert_eq!(relay.feed_line("MSG:5011,0,0,\"Done\",\"Done\""), None);
        assert_eq!(relay.feed_line("PRGV:1,2"), None);
        assert_eq!(relay.feed_line("nonsense"), None);
    }

    #[test]
    fn test_sink_keeps_latest_snapshot() {
        let (mut relay, receiver) = ProgressRelay::channel();
        assert_eq!(*receiver.borrow(), None);
        relay.feed_line("PRGT:5018,0,\"Copying\"");
        relay.feed_line("PRGV:10,100,100");
        relay.feed_line("PRGV:30,100,100");
        let latest = receiver.borrow().clone().unwrap();
        assert_eq!(latest.current, 30);
        assert_eq!(latest.title, "Copying");
    }

    #[test]
    fn test_publishing_without_receivers_does_not_fail() {
        let (mut relay, receiver) = ProgressRelay::channel();
        drop(receiver);
        assert!(relay.feed_line("PRGV:10,100,100").is_some());
    }

    #[tokio::test]
    async fn test_relay_progress_reads_to_end() {
        let output = "MSG:5011,0,0,\"Saving\",\"Saving\"\n\
                      PRGT:5018,0,\"Copying\"\n\
                      PRGC:5017,0,\"Title 1\"\n\
                      PRGV:10,100,100\n\
                      PRGV:50,100,100\n\
                      PRGV:100,100,100\n";
        let (mut relay, mut receiver) = ProgressRelay::channel();
        let snapshots = relay_progress(output.as_bytes(), &mut relay).await.unwrap();
        assert_eq!(snapshots, 3);
        assert!(receiver.has_changed().unwrap());
        let latest = receiver.borrow_and_update().clone().unwrap();
        assert_eq!(latest.current, 100);
        assert_eq!(latest.channel, "Title 1");
    }

    #[tokio::test]
    async fn test_consumer_on_another_task() {
        let (mut relay, mut receiver) = ProgressRelay::channel();
        let consumer = tokio::spawn(async move {
            let mut seen = Vec::new();
            while receiver.changed().await.is_ok() {
                if let Some(status) = receiver.borrow_and_update().clone() {
                    seen.push(status.current);
                }
            }
            seen
        });

        let output = "PRGV:1,10,10\nPRGV:5,10,10\nPRGV:10,10,10\n";
        relay_progress(output.as_bytes(), &mut relay).await.unwrap();
        drop(relay);

        let seen = consumer.await.unwrap();
        assert_eq!(seen.last(), Some(&10));
        assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
