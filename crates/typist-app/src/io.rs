//! Line-delimited JSON plumbing between stdio and the typing driver.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use typist_typing::{InputEvent, InputFeed, TypingNotification};

/// Forward every input event read from `reader` into `feed`.
///
/// Blank lines and `#` comments are skipped. Malformed lines are logged and
/// dropped. Returns the number of events forwarded once the reader hits EOF.
pub async fn read_events<R>(reader: R, feed: InputFeed) -> typist_common::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut forwarded = 0;
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match InputEvent::parse_line(trimmed) {
            Ok(event) => {
                feed.send(event).await?;
                forwarded += 1;
            }
            Err(e) => warn!(line = line_no, error = %e, "skipping input line"),
        }
    }

    debug!(events = forwarded, "input closed");
    Ok(forwarded)
}

/// Write each notification as one JSON line until the channel closes.
pub async fn write_notifications<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<TypingNotification>,
) -> typist_common::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(notification) = rx.recv().await {
        let mut line = serde_json::to_string(&notification)
            .map_err(|e| typist_common::TypistError::Sink(e.to_string()))?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        written += 1;
    }
    Ok(written)
}
