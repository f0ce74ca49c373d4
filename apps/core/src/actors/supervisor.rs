use crate::actors::generator::GeneratorActorHandle;
use crate::actors::messages::SupervisorMessage;
use crate::actors::notifier::WebhookNotifier;
use crate::actors::speech::SpeechActorHandle;
use crate::actors::store::SupabaseStore;
use crate::actors::traits::{CareCircleNotifier, CareStore, SpeechSynthesizer, TextGenerator};
use crate::brain::composer::{
    normalize_for_speech, simplify_vocabulary, ComposeOptions, Composer, ToneLabel,
};
use crate::brain::{classify_emotion, classify_safety, classify_vitals, select_nudges};
use crate::config::CoreConfig;
use crate::error::AppError;
use crate::models::{
    AudioRef, BuddyRequest, CompanionRequest, EmotionLabel, NudgeRequest, ResponseEnvelope,
    SafetyAlert, SafetyLevel, VitalsRequest,
};
use crate::reminder::ReminderFlags;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{error, info, instrument, warn};
use validator::Validate;

const HANDLE_TIMEOUT: Duration = Duration::from_secs(30);
const CHAT_TEMPERATURE: f32 = 0.7;

/// Warm, non-technical text surfaced when a collaborator lets us down.
/// Internal error detail never reaches the envelope.
const GENERIC_TROUBLE_MESSAGE: &str =
    "I'm having a little trouble right now, dear. Let's try again in a moment.";

/// Appended at most once per user per process lifetime.
const DAILY_CHECKIN_QUESTION: &str = "By the way, how are you feeling today?";

const VITALS_OK_MESSAGE: &str =
    "Thank you for sharing. Everything looks steady and well today.";

/// Persona instructions for every generative reply.
const PERSONA_SYSTEM_PROMPT: &str = "You are CarePal, a warm, patient companion for an elderly person. \
Speak simply and kindly, in short sentences. Use everyday words, never technical ones. \
Never mention that you are an AI or a program. Keep replies to two or three sentences.";

/// A handle to the supervisor actor.
///
/// This is the primary entry point for all business logic. It validates
/// requests, runs the brain components, and orchestrates the speech,
/// generation, datastore, and notification collaborators.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
}

impl SupervisorHandle {
    /// Creates a supervisor wired to the production collaborators.
    pub fn new(config: &CoreConfig) -> Self {
        Self::with_collaborators(
            Arc::new(SpeechActorHandle::from_config(config)),
            Arc::new(GeneratorActorHandle::from_config(config)),
            Arc::new(SupabaseStore::from_config(config)),
            Arc::new(WebhookNotifier::from_config(config)),
        )
    }

    /// Creates a supervisor over explicit collaborators.
    ///
    /// This is the seam tests use to inject mocks.
    pub fn with_collaborators<S, G, D, N>(
        speech: Arc<S>,
        generator: Arc<G>,
        store: Arc<D>,
        notifier: Arc<N>,
    ) -> Self
    where
        S: SpeechSynthesizer,
        G: TextGenerator,
        D: CareStore,
        N: CareCircleNotifier,
    {
        let (sender, receiver) = mpsc::channel(32);
        let runner = SupervisorRunner {
            receiver,
            speech,
            generator,
            store,
            notifier,
            composer: Composer::new(),
            reminders: ReminderFlags::new(),
        };
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    async fn send_and_wait(
        &self,
        msg: SupervisorMessage,
        recv: oneshot::Receiver<Result<ResponseEnvelope, AppError>>,
    ) -> Result<ResponseEnvelope, AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(HANDLE_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    /// Processes a daily check-in message.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn check_in(&self, request: CompanionRequest) -> Result<ResponseEnvelope, AppError> {
        let (send, recv) = oneshot::channel();
        self.send_and_wait(SupervisorMessage::CheckIn { request, responder: send }, recv)
            .await
    }

    /// Processes a free-form companion chat message.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn chat(&self, request: CompanionRequest) -> Result<ResponseEnvelope, AppError> {
        let (send, recv) = oneshot::channel();
        self.send_and_wait(SupervisorMessage::Chat { request, responder: send }, recv)
            .await
    }

    /// Processes a vitals reading.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn report_vitals(&self, request: VitalsRequest) -> Result<ResponseEnvelope, AppError> {
        let (send, recv) = oneshot::channel();
        self.send_and_wait(SupervisorMessage::ReportVitals { request, responder: send }, recv)
            .await
    }

    /// Computes the current wellness nudges for a user.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn daily_nudges(&self, request: NudgeRequest) -> Result<ResponseEnvelope, AppError> {
        let (send, recv) = oneshot::channel();
        self.send_and_wait(SupervisorMessage::DailyNudges { request, responder: send }, recv)
            .await
    }

    /// Produces a social buddy message for a user.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn buddy_message(&self, request: BuddyRequest) -> Result<ResponseEnvelope, AppError> {
        let (send, recv) = oneshot::channel();
        self.send_and_wait(SupervisorMessage::BuddyMessage { request, responder: send }, recv)
            .await
    }
}

// --- Actor Runner ---
struct SupervisorRunner<S, G, D, N>
where
    S: SpeechSynthesizer,
    G: TextGenerator,
    D: CareStore,
    N: CareCircleNotifier,
{
    receiver: mpsc::Receiver<SupervisorMessage>,
    speech: Arc<S>,
    generator: Arc<G>,
    store: Arc<D>,
    notifier: Arc<N>,
    composer: Composer,
    reminders: ReminderFlags,
}

impl<S, G, D, N> SupervisorRunner<S, G, D, N>
where
    S: SpeechSynthesizer,
    G: TextGenerator,
    D: CareStore,
    N: CareCircleNotifier,
{
    async fn run(mut self) {
        info!("Supervisor started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }
        info!("Supervisor stopped");
    }

    async fn handle_message(&mut self, msg: SupervisorMessage) {
        match msg {
            SupervisorMessage::CheckIn { request, responder } => {
                let result = self.handle_check_in(request).await;
                if let Err(e) = &result {
                    error!("Error processing check-in: {:?}", e);
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::Chat { request, responder } => {
                let result = self.handle_chat(request).await;
                if let Err(e) = &result {
                    error!("Error processing chat: {:?}", e);
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::ReportVitals { request, responder } => {
                let result = self.handle_vitals(request).await;
                if let Err(e) = &result {
                    error!("Error processing vitals: {:?}", e);
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::DailyNudges { request, responder } => {
                let result = self.handle_daily_nudges(request).await;
                if let Err(e) = &result {
                    error!("Error computing nudges: {:?}", e);
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::BuddyMessage { request, responder } => {
                let result = self.handle_buddy(request).await;
                if let Err(e) = &result {
                    error!("Error producing buddy message: {:?}", e);
                }
                let _ = responder.send(result);
            }
        }
    }

    /// Notifies the care circle of a high-severity alert.
    ///
    /// Failure here must never block the spoken reassurance, so errors are
    /// logged and swallowed.
    async fn notify_care_circle(&self, event: &str, user_id: &str, alert: &SafetyAlert) {
        let payload = serde_json::json!({
            "user_id": user_id,
            "level": alert.level.label(),
            "detected": alert.detected,
            "actions": alert.actions,
        });
        match self.notifier.notify(event, payload).await {
            Ok(true) => {}
            Ok(false) => warn!("Care circle webhook declined event '{}'", event),
            Err(e) => warn!("Care circle notification failed: {}", e),
        }
    }

    /// Synthesizes speech for already-composed text.
    ///
    /// `None` signals the caller to degrade to the warm generic failure
    /// envelope; the failure detail stays in the logs.
    async fn synthesize(&self, text: &str) -> Option<AudioRef> {
        match self.speech.synthesize(text).await {
            Ok(audio) => Some(audio),
            Err(e) => {
                warn!("Speech synthesis failed: {}", e);
                None
            }
        }
    }

    fn warm_failure(alert: Option<SafetyAlert>) -> ResponseEnvelope {
        ResponseEnvelope {
            success: false,
            message: GENERIC_TROUBLE_MESSAGE.to_string(),
            speech: None,
            alert,
            nudges: vec![],
        }
    }

    /// Classification, composition, notification, and persistence shared by
    /// check-ins and chat messages that raised a safety alert.
    async fn respond_to_alert(
        &self,
        collection: &str,
        request: &CompanionRequest,
        alert: SafetyAlert,
    ) -> ResponseEnvelope {
        let message = self.composer.compose(
            ToneLabel::Safety(alert.level),
            ComposeOptions { reassurance_prefix: true },
        );

        if alert.level.is_high_severity() {
            self.notify_care_circle("safety_alert", &request.user_id, &alert)
                .await;
        }

        let speech = self.synthesize(&message).await;
        self.store
            .save(
                collection,
                serde_json::json!({
                    "user_id": request.user_id,
                    "message": request.message,
                    "reply": message,
                    "level": alert.level.label(),
                }),
            )
            .await;

        match speech {
            Some(audio) => ResponseEnvelope {
                success: true,
                message,
                speech: Some(audio),
                alert: Some(alert),
                nudges: vec![],
            },
            None => Self::warm_failure(Some(alert)),
        }
    }

    async fn handle_check_in(&self, request: CompanionRequest) -> Result<ResponseEnvelope, AppError> {
        request.validate()?;

        let alert = classify_safety(&request.message);
        if alert.level != SafetyLevel::Normal {
            return Ok(self.respond_to_alert("check_ins", &request, alert).await);
        }

        let emotion = classify_emotion(&request.message);
        let message = self.composer.compose(
            ToneLabel::Emotion(emotion),
            ComposeOptions { reassurance_prefix: emotion != EmotionLabel::Calm },
        );

        let speech = self.synthesize(&message).await;
        self.store
            .save(
                "check_ins",
                serde_json::json!({
                    "user_id": request.user_id,
                    "message": request.message,
                    "reply": message,
                    "emotion": emotion.label(),
                }),
            )
            .await;

        match speech {
            Some(audio) => Ok(ResponseEnvelope {
                success: true,
                message,
                speech: Some(audio),
                alert: Some(alert),
                nudges: vec![],
            }),
            None => Ok(Self::warm_failure(Some(alert))),
        }
    }

    async fn handle_chat(&self, request: CompanionRequest) -> Result<ResponseEnvelope, AppError> {
        request.validate()?;

        let alert = classify_safety(&request.message);
        if alert.level != SafetyLevel::Normal {
            return Ok(self.respond_to_alert("conversations", &request, alert).await);
        }

        let emotion = classify_emotion(&request.message);
        let generated = match self
            .generator
            .generate(
                build_chat_prompt(&request.message),
                Some(build_system_prompt(emotion)),
                Some(CHAT_TEMPERATURE),
            )
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Text generation failed: {}", e);
                return Ok(Self::warm_failure(None));
            }
        };

        let mut reply = normalize_for_speech(&simplify_vocabulary(&generated));
        if !self.reminders.check_and_mark(&request.user_id) {
            reply = format!("{} {}", reply, DAILY_CHECKIN_QUESTION);
        }

        let speech = self.synthesize(&reply).await;
        self.store
            .save(
                "conversations",
                serde_json::json!({
                    "user_id": request.user_id,
                    "message": request.message,
                    "reply": reply,
                    "emotion": emotion.label(),
                }),
            )
            .await;

        match speech {
            Some(audio) => Ok(ResponseEnvelope {
                success: true,
                message: reply,
                speech: Some(audio),
                alert: None,
                nudges: vec![],
            }),
            None => Ok(Self::warm_failure(None)),
        }
    }

    async fn handle_vitals(&self, request: VitalsRequest) -> Result<ResponseEnvelope, AppError> {
        request.validate()?;

        let alert = classify_vitals(&request.vitals);
        let message = match alert.level {
            SafetyLevel::Normal => VITALS_OK_MESSAGE.to_string(),
            level => self.composer.compose(
                ToneLabel::Safety(level),
                ComposeOptions { reassurance_prefix: level == SafetyLevel::Emergency },
            ),
        };

        if alert.level.is_high_severity() {
            self.notify_care_circle("vitals_alert", &request.user_id, &alert)
                .await;
        }

        let speech = self.synthesize(&message).await;
        self.store
            .save(
                "vitals",
                serde_json::json!({
                    "user_id": request.user_id,
                    "heart_rate": request.vitals.heart_rate,
                    "fall_detected": request.vitals.fall_detected,
                    "reading_at": request.vitals.timestamp,
                    "level": alert.level.label(),
                }),
            )
            .await;

        match speech {
            Some(audio) => Ok(ResponseEnvelope {
                success: true,
                message,
                speech: Some(audio),
                alert: Some(alert),
                nudges: vec![],
            }),
            None => Ok(Self::warm_failure(Some(alert))),
        }
    }

    async fn handle_daily_nudges(&self, request: NudgeRequest) -> Result<ResponseEnvelope, AppError> {
        request.validate()?;

        let nudges = select_nudges(
            request.hour,
            &request.medications,
            request.hydration.as_ref(),
            request.weather.as_ref(),
            request.mood,
        );

        // The activity step always emits, so the list is never empty.
        let top = &nudges[0];
        let message = top.message.clone();
        let speech = self.synthesize(&top.speech_message).await;

        self.store
            .save(
                "nudges",
                serde_json::json!({
                    "user_id": request.user_id,
                    "hour": request.hour,
                    "nudges": nudges,
                }),
            )
            .await;

        Ok(ResponseEnvelope {
            success: true,
            message,
            speech,
            alert: None,
            nudges,
        })
    }

    async fn handle_buddy(&self, request: BuddyRequest) -> Result<ResponseEnvelope, AppError> {
        request.validate()?;

        let generated = match self
            .generator
            .generate(
                build_buddy_prompt(&request.buddy_name),
                Some(PERSONA_SYSTEM_PROMPT.to_string()),
                Some(CHAT_TEMPERATURE),
            )
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Buddy message generation failed: {}", e);
                return Ok(Self::warm_failure(None));
            }
        };

        let reply = normalize_for_speech(&simplify_vocabulary(&generated));
        let speech = self.synthesize(&reply).await;
        self.store
            .save(
                "buddy_messages",
                serde_json::json!({
                    "user_id": request.user_id,
                    "buddy_name": request.buddy_name,
                    "reply": reply,
                }),
            )
            .await;

        match speech {
            Some(audio) => Ok(ResponseEnvelope {
                success: true,
                message: reply,
                speech: Some(audio),
                alert: None,
                nudges: vec![],
            }),
            None => Ok(Self::warm_failure(None)),
        }
    }
}

fn build_system_prompt(emotion: EmotionLabel) -> String {
    let guidance = match emotion {
        EmotionLabel::Stressed => "The user sounds worried. Be soothing and steady.",
        EmotionLabel::Confused => "The user sounds confused. Be patient and explain one thing at a time.",
        EmotionLabel::Lonely => "The user sounds lonely. Be especially warm and suggest reaching out to someone they love.",
        EmotionLabel::Calm => "The user sounds content. Be cheerful and curious about their day.",
    };
    format!("{} {}", PERSONA_SYSTEM_PROMPT, guidance)
}

fn build_chat_prompt(message: &str) -> String {
    format!("The user says: {}", message)
}

fn build_buddy_prompt(buddy_name: &str) -> String {
    format!(
        "Write a short, cheerful message to the user from their friend {}. \
         Mention looking forward to catching up soon.",
        buddy_name
    )
}
