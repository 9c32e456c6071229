//! Runtime state wiring the Discord adapter to the selection flow.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serenity::http::Http;
use tokio_util::sync::CancellationToken;

use datebot_core::flow::{EventDispatcher, FlowSettings};
use datebot_core::session::{NudgeScheduler, SessionStore};
use datebot_infra::discord::{DiscordPlatform, Handler};
use datebot_types::config::BotConfig;

/// Long-lived services shared by every gateway event.
pub struct AppState {
    pub platform: Arc<DiscordPlatform>,
    pub sessions: Arc<SessionStore>,
    pub dispatcher: Arc<EventDispatcher<DiscordPlatform>>,
    /// Cancelled on shutdown; parent of the sweeper and every pending nudge.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn init(config: &BotConfig, token: &SecretString) -> Self {
        let shutdown = CancellationToken::new();
        let platform = Arc::new(DiscordPlatform::new(Arc::new(Http::new(
            token.expose_secret(),
        ))));
        let sessions = Arc::new(SessionStore::new(config.session_ttl(), config.max_sessions));
        let nudges = Arc::new(NudgeScheduler::new(shutdown.child_token()));
        let dispatcher = Arc::new(EventDispatcher::new(
            Arc::clone(&platform),
            Arc::clone(&sessions),
            nudges,
            FlowSettings::from(config),
        ));

        Self {
            platform,
            sessions,
            dispatcher,
            shutdown,
        }
    }

    pub fn handler(&self) -> Handler {
        Handler::new(Arc::clone(&self.dispatcher), Arc::clone(&self.platform))
    }
}
