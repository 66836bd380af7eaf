//! Playback Worker - 播放调度任务
//!
//! 独占 PlaybackController，把 HTTP 侧的命令和引擎回报的事件
//! 放在同一个任务里依次处理，状态机不需要任何锁

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::application::ports::{PlaybackControlError, PlaybackControlPort, SpeechEventReceiver};
use crate::application::PlaybackController;
use crate::domain::document::{DocumentId, Transcript};
use crate::domain::playback::{PlaybackError, PlaybackSnapshot, VoiceDescriptor, VoiceParams};

/// 命令队列容量
const COMMAND_QUEUE_CAPACITY: usize = 64;

/// 投递给调度任务的命令，结果通过 oneshot 返回
#[derive(Debug)]
pub enum PlaybackCommand {
    Start {
        transcript: Arc<Transcript>,
        voice: VoiceParams,
        reply: oneshot::Sender<Result<PlaybackSnapshot, PlaybackError>>,
    },
    Pause {
        reply: oneshot::Sender<PlaybackSnapshot>,
    },
    Resume {
        reply: oneshot::Sender<PlaybackSnapshot>,
    },
    Stop {
        reply: oneshot::Sender<PlaybackSnapshot>,
    },
    StopSuperseded {
        current: DocumentId,
        reply: oneshot::Sender<PlaybackSnapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<PlaybackSnapshot>,
    },
    ListVoices {
        reply: oneshot::Sender<Vec<VoiceDescriptor>>,
    },
}

/// 播放调度任务
pub struct PlaybackWorker {
    controller: PlaybackController,
    commands: mpsc::Receiver<PlaybackCommand>,
    speech_events: SpeechEventReceiver,
}

impl PlaybackWorker {
    /// 创建调度任务及其句柄
    pub fn new(
        controller: PlaybackController,
        speech_events: SpeechEventReceiver,
    ) -> (Self, PlaybackHandle) {
        let (tx, rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let worker = Self {
            controller,
            commands: rx,
            speech_events,
        };
        (worker, PlaybackHandle { sender: tx })
    }

    /// 启动调度循环，所有句柄释放后退出
    pub async fn run(mut self) {
        tracing::info!(
            speech_available = self.controller.is_available(),
            "PlaybackWorker started"
        );

        let mut events_open = true;
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.dispatch(command),
                    None => break,
                },
                event = self.speech_events.recv(), if events_open => match event {
                    Some(event) => self.controller.handle_event(event),
                    None => {
                        tracing::warn!("Speech event channel closed");
                        events_open = false;
                    }
                },
            }
        }

        self.controller.stop();
        tracing::info!("PlaybackWorker stopped");
    }

    fn dispatch(&mut self, command: PlaybackCommand) {
        // 调用方放弃等待时回复会失败，忽略即可
        match command {
            PlaybackCommand::Start {
                transcript,
                voice,
                reply,
            } => {
                let result = self
                    .controller
                    .start(transcript, voice)
                    .map(|()| self.controller.snapshot());
                let _ = reply.send(result);
            }
            PlaybackCommand::Pause { reply } => {
                self.controller.pause();
                let _ = reply.send(self.controller.snapshot());
            }
            PlaybackCommand::Resume { reply } => {
                self.controller.resume();
                let _ = reply.send(self.controller.snapshot());
            }
            PlaybackCommand::Stop { reply } => {
                self.controller.stop();
                let _ = reply.send(self.controller.snapshot());
            }
            PlaybackCommand::StopSuperseded { current, reply } => {
                self.controller.stop_superseded(current);
                let _ = reply.send(self.controller.snapshot());
            }
            PlaybackCommand::Snapshot { reply } => {
                let _ = reply.send(self.controller.snapshot());
            }
            PlaybackCommand::ListVoices { reply } => {
                let _ = reply.send(self.controller.list_voices());
            }
        }
    }
}

/// 调度任务句柄，可在多个请求间共享
#[derive(Clone)]
pub struct PlaybackHandle {
    sender: mpsc::Sender<PlaybackCommand>,
}

impl PlaybackHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> PlaybackCommand,
    ) -> Result<T, PlaybackControlError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(build(tx))
            .await
            .map_err(|_| PlaybackControlError::WorkerStopped)?;
        rx.await.map_err(|_| PlaybackControlError::WorkerStopped)
    }
}

#[async_trait]
impl PlaybackControlPort for PlaybackHandle {
    async fn start(
        &self,
        transcript: Arc<Transcript>,
        voice: VoiceParams,
    ) -> Result<PlaybackSnapshot, PlaybackControlError> {
        let result = self
            .request(|reply| PlaybackCommand::Start {
                transcript,
                voice,
                reply,
            })
            .await?;
        Ok(result?)
    }

    async fn pause(&self) -> Result<PlaybackSnapshot, PlaybackControlError> {
        self.request(|reply| PlaybackCommand::Pause { reply }).await
    }

    async fn resume(&self) -> Result<PlaybackSnapshot, PlaybackControlError> {
        self.request(|reply| PlaybackCommand::Resume { reply }).await
    }

    async fn stop(&self) -> Result<PlaybackSnapshot, PlaybackControlError> {
        self.request(|reply| PlaybackCommand::Stop { reply }).await
    }

    async fn stop_superseded(
        &self,
        current: DocumentId,
    ) -> Result<PlaybackSnapshot, PlaybackControlError> {
        self.request(|reply| PlaybackCommand::StopSuperseded { current, reply })
            .await
    }

    async fn snapshot(&self) -> Result<PlaybackSnapshot, PlaybackControlError> {
        self.request(|reply| PlaybackCommand::Snapshot { reply }).await
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, PlaybackControlError> {
        self.request(|reply| PlaybackCommand::ListVoices { reply }).await
    }
}
