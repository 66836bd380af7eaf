//! Speech Adapter - 朗读后端实现

mod probe;
mod remote_speech_engine;
mod simulated_speech_engine;

pub use probe::{probe_speech_capability, SpeechProbe};
pub use remote_speech_engine::{
    utf16_to_char_index, RemoteClientMessage, RemoteCommand, RemoteSpeechEngine,
};
pub use simulated_speech_engine::{SimulatedSpeechConfig, SimulatedSpeechEngine};
