//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现

use tokio::sync::broadcast;

use crate::application::ports::{PlaybackEvent, PlaybackEventSink};

/// 广播通道容量，慢订阅者超过后会收到 Lagged
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// 事件发布器
///
/// 所有播放事件通过同一个全局广播通道推送，订阅者各自持有接收端
pub struct EventPublisher {
    channel: broadcast::Sender<PlaybackEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { channel: tx }
    }

    /// 订阅全部播放事件
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.channel.subscribe()
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.channel.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEventSink for EventPublisher {
    fn publish(&self, event: PlaybackEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::trace!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::playback::{PlaybackState, UtteranceId};

    #[tokio::test]
    async fn test_subscribers_receive_in_order() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe();

        publisher.publish(PlaybackEvent::StateChanged {
            state: PlaybackState::Speaking,
            utterance_id: Some(UtteranceId::new(1)),
        });
        publisher.publish(PlaybackEvent::SentenceChanged {
            sentence_index: Some(0),
        });

        assert!(matches!(
            rx.recv().await.unwrap(),
            PlaybackEvent::StateChanged {
                state: PlaybackState::Speaking,
                ..
            }
        ));
        assert_eq!(
            rx.recv().await.unwrap(),
            PlaybackEvent::SentenceChanged {
                sentence_index: Some(0)
            }
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        let publisher = EventPublisher::new();
        assert_eq!(publisher.subscriber_count(), 0);
        publisher.publish(PlaybackEvent::SentenceChanged {
            sentence_index: None,
        });
    }

    #[test]
    fn test_event_wire_format() {
        let event = PlaybackEvent::StateChanged {
            state: PlaybackState::Idle,
            utterance_id: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "StateChanged", "data": {"state": "idle"}})
        );
    }
}
