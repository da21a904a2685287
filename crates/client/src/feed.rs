//! WebSocket event feed.
//!
//! [`EventFeed`] maintains the session's connection to the server's
//! fan-out channel, decoding [`AnnotationEvent`] frames and delivering
//! them as [`FeedNotice`]s. On disconnect it reconnects with exponential
//! backoff; the server keeps no backlog, so the consumer must issue a full
//! reload on every [`FeedNotice::Connected`] — that reload is the only
//! recovery path for events missed while disconnected.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use geomark_events::AnnotationEvent;

/// Notifications delivered to the feed consumer.
#[derive(Debug)]
pub enum FeedNotice {
    /// The feed (re)connected. The consumer must reload the active dataset.
    Connected,
    /// A committed mutation arrived.
    Event(AnnotationEvent),
    /// The connection dropped; a reconnect attempt follows.
    Disconnected,
}

/// Tunable parameters for the exponential-backoff strategy.
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
///
/// The result is clamped to [`ReconnectConfig::max_delay`].
pub fn next_delay(current: Duration, config: &ReconnectConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Long-lived fan-out feed for one session.
pub struct EventFeed {
    url: String,
    reconnect: ReconnectConfig,
}

impl EventFeed {
    /// Create a feed for a fan-out endpoint, e.g. `ws://localhost:8000/ws`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect: ReconnectConfig::default(),
        }
    }

    /// Override the reconnect backoff parameters.
    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }

    /// Run the feed until `cancel` fires or the consumer goes away.
    ///
    /// Connect failures and dropped connections are retried with
    /// exponential backoff; a successful connection resets the delay.
    pub async fn run(self, cancel: CancellationToken, notices: mpsc::UnboundedSender<FeedNotice>) {
        let mut delay = self.reconnect.initial_delay;

        loop {
            let connected = tokio::select! {
                () = cancel.cancelled() => return,
                result = connect_async(&self.url) => match result {
                    Ok((stream, _response)) => {
                        tracing::info!(url = %self.url, "Event feed connected");
                        delay = self.reconnect.initial_delay;

                        if notices.send(FeedNotice::Connected).is_err() {
                            return;
                        }
                        self.pump(stream, &cancel, &notices).await;

                        if notices.send(FeedNotice::Disconnected).is_err() {
                            return;
                        }
                        true
                    }
                    Err(e) => {
                        tracing::warn!(url = %self.url, error = %e, "Event feed connect failed");
                        false
                    }
                },
            };

            if cancel.is_cancelled() {
                return;
            }

            tracing::debug!(
                delay_ms = delay.as_millis() as u64,
                reconnecting_after_drop = connected,
                "Event feed backing off"
            );
            tokio::select! {
                () = cancel.cancelled() => return,
                () = tokio::time::sleep(delay) => {}
            }
            delay = next_delay(delay, &self.reconnect);
        }
    }

    /// Read frames from an established connection until it drops.
    async fn pump(
        &self,
        mut stream: WsStream,
        cancel: &CancellationToken,
        notices: &mpsc::UnboundedSender<FeedNotice>,
    ) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => return,
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<AnnotationEvent>(&text) {
                            Ok(event) => {
                                if notices.send(FeedNotice::Event(event)).is_err() {
                                    return;
                                }
                            }
                            Err(e) => {
                                // Unknown frame types are skipped, not fatal.
                                tracing::debug!(error = %e, "Unrecognized feed frame");
                            }
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        let _ = stream.send(Message::Pong(payload)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Event feed connection closed");
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Event feed receive error");
                        return;
                    }
                },
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_and_clamps() {
        let config = ReconnectConfig::default();

        let d1 = next_delay(config.initial_delay, &config);
        assert_eq!(d1, Duration::from_secs(2));

        let d2 = next_delay(d1, &config);
        assert_eq!(d2, Duration::from_secs(4));

        let clamped = next_delay(Duration::from_secs(25), &config);
        assert_eq!(clamped, config.max_delay);
    }
}
