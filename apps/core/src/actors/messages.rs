use crate::error::AppError;
use crate::models::{
    AudioRef, BuddyRequest, CompanionRequest, NudgeRequest, ResponseEnvelope, VitalsRequest,
};
use tokio::sync::oneshot;

/// Messages that can be sent to the speech-synthesis actor.
#[derive(Debug)]
pub enum SpeechMessage {
    /// A request to synthesize text into audio.
    Synthesize {
        text: String,
        /// A channel to send the resulting audio payload back.
        responder: oneshot::Sender<Result<AudioRef, AppError>>,
    },
}

/// Messages that can be sent to the text-generation actor.
#[derive(Debug)]
pub enum GeneratorMessage {
    /// A request to generate a text completion.
    Generate {
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
        /// A channel to send the generated text back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
}

/// Messages that can be sent to the supervisor actor.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// A daily check-in message from the user.
    CheckIn {
        request: CompanionRequest,
        responder: oneshot::Sender<Result<ResponseEnvelope, AppError>>,
    },
    /// A free-form companion chat message.
    Chat {
        request: CompanionRequest,
        responder: oneshot::Sender<Result<ResponseEnvelope, AppError>>,
    },
    /// A vitals reading from a wearable.
    ReportVitals {
        request: VitalsRequest,
        responder: oneshot::Sender<Result<ResponseEnvelope, AppError>>,
    },
    /// A request to compute the current wellness nudges.
    DailyNudges {
        request: NudgeRequest,
        responder: oneshot::Sender<Result<ResponseEnvelope, AppError>>,
    },
    /// A request for a social buddy message.
    BuddyMessage {
        request: BuddyRequest,
        responder: oneshot::Sender<Result<ResponseEnvelope, AppError>>,
    },
}
