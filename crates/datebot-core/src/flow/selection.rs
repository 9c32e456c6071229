//! Month -> paged day -> confirmation state machine.
//!
//! Per user the flow moves through:
//!
//! ```text
//! AwaitingMonth --month--> AwaitingDay(M, 1) --next/prev--> AwaitingDay(M, P±1)
//!                                            --day D-----> AwaitingConfirmation(M, D)
//! AwaitingConfirmation --"not done"--> AwaitingConfirmation (nudge again)
//!                      --"done"------> Idle (role removed, session dropped)
//! ```
//!
//! The stored month is the only state that must survive between
//! interactions; the current page travels in the day menu's custom id.

use std::sync::Arc;

use tracing::{debug, error, info};

use datebot_types::event::{ComponentAction, ComponentEvent, InteractionRef};
use datebot_types::ids::{ChannelId, UserId};
use datebot_types::month::Month;
use datebot_types::outbound::{InteractionResponse, OutboundMessage};
use datebot_types::selection::{DayChoice, MonthChoice, SelectionPhase, UserSelection};

use super::{FlowError, FlowSettings, revoke_role};
use crate::calendar;
use crate::platform::ChatPlatform;
use crate::render;
use crate::session::{NudgeScheduler, SessionStore};

pub struct SelectionFlow<P: ChatPlatform> {
    platform: Arc<P>,
    sessions: Arc<SessionStore>,
    nudges: Arc<NudgeScheduler>,
    settings: FlowSettings,
}

impl<P: ChatPlatform> SelectionFlow<P> {
    pub fn new(
        platform: Arc<P>,
        sessions: Arc<SessionStore>,
        nudges: Arc<NudgeScheduler>,
        settings: FlowSettings,
    ) -> Self {
        Self {
            platform,
            sessions,
            nudges,
            settings,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn nudges(&self) -> &NudgeScheduler {
        &self.nudges
    }

    /// Post the month menu in `channel_id`.
    pub async fn start(&self, channel_id: ChannelId) -> Result<(), FlowError> {
        self.platform
            .send_message(channel_id, render::month_menu())
            .await?;
        debug!(%channel_id, "posted month menu");
        Ok(())
    }

    /// Advance the flow for one component interaction.
    pub async fn handle(&self, event: &ComponentEvent) -> Result<(), FlowError> {
        match &event.action {
            ComponentAction::MonthSelected(MonthChoice::Neutral) => {
                self.reply(&event.interaction, OutboundMessage::ephemeral(render::PICK_REAL_MONTH))
                    .await
            }
            ComponentAction::MonthSelected(MonthChoice::Month(month)) => {
                self.on_month(event, *month).await
            }
            ComponentAction::DaySelected { page, choice } => {
                self.on_day_menu(event, *page, *choice).await
            }
            ComponentAction::ConfigDone => self.on_config_done(event).await,
            ComponentAction::ConfigNotDone => self.on_config_not_done(event).await,
            ComponentAction::Unknown { custom_id } => {
                debug!(%custom_id, "ignoring foreign component");
                Ok(())
            }
        }
    }

    async fn on_month(&self, event: &ComponentEvent, month: Month) -> Result<(), FlowError> {
        let user_id = event.user_id;
        let days = calendar::days_in_current_month(month);

        self.nudges.cancel(user_id);
        self.sessions.insert(UserSelection::new(user_id, month));
        debug!(%user_id, %month, days, "month selected");

        self.reply(&event.interaction, render::month_chosen(month, days))
            .await
    }

    async fn on_day_menu(
        &self,
        event: &ComponentEvent,
        page: u32,
        choice: DayChoice,
    ) -> Result<(), FlowError> {
        let user_id = event.user_id;
        let Some(selection) = self.sessions.get(user_id) else {
            debug!(%user_id, "day menu used without a stored month");
            return self
                .reply(&event.interaction, OutboundMessage::ephemeral(render::SELECTION_LOST))
                .await;
        };

        let days = calendar::days_in_current_month(selection.month);

        let page = match choice {
            DayChoice::NextPage => calendar::clamp_page(days, page.saturating_add(1)),
            DayChoice::PreviousPage => calendar::clamp_page(days, page.saturating_sub(1)),
            DayChoice::Day(day) => return self.on_day(event, selection.month, days, day).await,
        };

        self.sessions
            .set_phase(user_id, SelectionPhase::AwaitingDay { page });
        debug!(%user_id, page, "day page changed");

        self.platform
            .respond(
                &event.interaction,
                InteractionResponse::Update(render::day_page(days, page)),
            )
            .await?;
        Ok(())
    }

    async fn on_day(
        &self,
        event: &ComponentEvent,
        month: Month,
        days: u32,
        day: u32,
    ) -> Result<(), FlowError> {
        let user_id = event.user_id;
        if !(1..=days).contains(&day) {
            debug!(%user_id, day, days, "day outside month");
            return self
                .reply(&event.interaction, render::invalid_day(days))
                .await;
        }

        self.sessions
            .set_phase(user_id, SelectionPhase::AwaitingConfirmation { day });
        info!(%user_id, date = %calendar::format_month_day(month, day), "date selected");

        self.reply(
            &event.interaction,
            render::set_command(month, day, &self.settings.time_zone),
        )
        .await?;

        self.schedule_nudge(user_id, event.interaction.clone());
        Ok(())
    }

    async fn on_config_done(&self, event: &ComponentEvent) -> Result<(), FlowError> {
        let user_id = event.user_id;
        self.nudges.cancel(user_id);

        revoke_role(
            self.platform.as_ref(),
            event.guild_id,
            user_id,
            &event.member_roles,
            self.settings.role_id,
        )
        .await;

        self.sessions.remove(user_id);
        info!(%user_id, "configuration confirmed");

        self.reply(&event.interaction, OutboundMessage::ephemeral(render::CONFIG_COMPLETE))
            .await
    }

    async fn on_config_not_done(&self, event: &ComponentEvent) -> Result<(), FlowError> {
        self.reply(&event.interaction, render::waiting(self.settings.nudge_delay))
            .await?;
        self.schedule_nudge(event.user_id, event.interaction.clone());
        Ok(())
    }

    /// Ask again after the configured delay, replacing any pending prompt.
    fn schedule_nudge(&self, user_id: UserId, interaction: InteractionRef) {
        let platform = Arc::clone(&self.platform);
        self.nudges
            .schedule(user_id, self.settings.nudge_delay, async move {
                if let Err(e) = platform.follow_up(&interaction, render::nudge(user_id)).await {
                    error!(%user_id, error = %e, "failed to send confirmation prompt");
                }
            });
    }

    async fn reply(
        &self,
        interaction: &InteractionRef,
        message: OutboundMessage,
    ) -> Result<(), FlowError> {
        self.platform
            .respond(interaction, InteractionResponse::Reply(message))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PlatformCall, RecordingPlatform};
    use datebot_types::ids::{GuildId, InteractionId, RoleId};
    use datebot_types::outbound::ActionRow;
    use datebot_types::selection::{NEXT_PAGE_VALUE, PREVIOUS_PAGE_VALUE};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    const USER: UserId = UserId(7);
    const ROLE: RoleId = RoleId(900);
    const NUDGE_DELAY: Duration = Duration::from_millis(30);

    struct Harness {
        platform: Arc<RecordingPlatform>,
        flow: SelectionFlow<RecordingPlatform>,
    }

    fn harness() -> Harness {
        let platform = Arc::new(RecordingPlatform::default());
        let flow = SelectionFlow::new(
            Arc::clone(&platform),
            Arc::new(SessionStore::new(Duration::from_secs(600), 100)),
            Arc::new(NudgeScheduler::new(CancellationToken::new())),
            FlowSettings {
                channel_id: None,
                role_id: Some(ROLE),
                time_zone: "Europe/Warsaw".to_string(),
                nudge_delay: NUDGE_DELAY,
            },
        );
        Harness { platform, flow }
    }

    fn event(action: ComponentAction) -> ComponentEvent {
        event_with_roles(action, Vec::new())
    }

    fn event_with_roles(action: ComponentAction, roles: Vec<RoleId>) -> ComponentEvent {
        ComponentEvent {
            interaction: InteractionRef {
                id: InteractionId(1),
                token: "token".to_string(),
            },
            user_id: USER,
            guild_id: Some(GuildId(10)),
            member_roles: roles,
            action,
        }
    }

    fn pick_month(n: u32) -> ComponentEvent {
        event(ComponentAction::MonthSelected(MonthChoice::Month(
            Month::new(n).unwrap(),
        )))
    }

    fn pick_day(page: u32, choice: DayChoice) -> ComponentEvent {
        event(ComponentAction::DaySelected { page, choice })
    }

    fn menu_values(message: &OutboundMessage) -> Vec<String> {
        match &message.components[0] {
            ActionRow::SelectMenu(menu) => menu.options.iter().map(|o| o.value.clone()).collect(),
            other => panic!("expected select menu, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn neutral_month_prompts_and_leaves_store_untouched() {
        let h = harness();
        h.flow
            .handle(&event(ComponentAction::MonthSelected(MonthChoice::Neutral)))
            .await
            .unwrap();

        assert!(h.flow.sessions().is_empty());
        let responses = h.platform.responses();
        assert_eq!(
            responses,
            vec![InteractionResponse::Reply(OutboundMessage::ephemeral(
                render::PICK_REAL_MONTH
            ))]
        );
    }

    #[tokio::test]
    async fn month_pick_stores_month_and_replies_with_first_page() {
        let h = harness();
        h.flow.handle(&pick_month(1)).await.unwrap();

        let stored = h.flow.sessions().get(USER).unwrap();
        assert_eq!(stored.month.number(), 1);
        assert_eq!(stored.phase, SelectionPhase::AwaitingDay { page: 1 });

        let responses = h.platform.responses();
        let InteractionResponse::Reply(message) = &responses[0] else {
            panic!("month pick must post a new reply");
        };
        assert!(message.ephemeral);
        let values = menu_values(message);
        assert_eq!(values.first().unwrap(), "1");
        assert_eq!(values.last().unwrap(), NEXT_PAGE_VALUE);
    }

    #[tokio::test]
    async fn day_menu_without_month_reports_lost_selection() {
        let h = harness();
        h.flow.handle(&pick_day(1, DayChoice::Day(5))).await.unwrap();
        h.flow.handle(&pick_day(1, DayChoice::NextPage)).await.unwrap();

        let responses = h.platform.responses();
        assert_eq!(responses.len(), 2);
        for response in responses {
            let InteractionResponse::Reply(message) = response else {
                panic!("lost selection must not update a menu");
            };
            assert_eq!(message.content, render::SELECTION_LOST);
            assert!(message.components.is_empty());
        }
        assert!(!h.flow.nudges().is_pending(USER));
    }

    #[tokio::test]
    async fn paging_updates_menu_in_place() {
        let h = harness();
        h.flow.handle(&pick_month(1)).await.unwrap();
        h.flow.handle(&pick_day(1, DayChoice::NextPage)).await.unwrap();

        let responses = h.platform.responses();
        let InteractionResponse::Update(message) = &responses[1] else {
            panic!("paging must update the menu in place");
        };
        assert_eq!(message.content, "Strona 2: Wybierz dzień:");
        let values = menu_values(message);
        assert_eq!(values[0], PREVIOUS_PAGE_VALUE);
        assert_eq!(values[1], "24");
        assert_eq!(values.last().unwrap(), "31");
        assert_eq!(
            h.flow.sessions().get(USER).unwrap().phase,
            SelectionPhase::AwaitingDay { page: 2 }
        );

        h.flow
            .handle(&pick_day(2, DayChoice::PreviousPage))
            .await
            .unwrap();
        let responses = h.platform.responses();
        let InteractionResponse::Update(message) = &responses[2] else {
            panic!("paging must update the menu in place");
        };
        assert_eq!(message.content, "Strona 1: Wybierz dzień:");
    }

    #[tokio::test]
    async fn out_of_range_pages_are_clamped() {
        let h = harness();
        h.flow.handle(&pick_month(1)).await.unwrap();

        h.flow
            .handle(&pick_day(1, DayChoice::PreviousPage))
            .await
            .unwrap();
        h.flow.handle(&pick_day(2, DayChoice::NextPage)).await.unwrap();

        let responses = h.platform.responses();
        assert_eq!(responses[1].message().content, "Strona 1: Wybierz dzień:");
        assert_eq!(responses[2].message().content, "Strona 2: Wybierz dzień:");
    }

    #[tokio::test]
    async fn day_pick_replies_with_set_command_and_nudges_later() {
        let h = harness();
        h.flow.handle(&pick_month(1)).await.unwrap();
        h.flow.handle(&pick_day(1, DayChoice::Day(15))).await.unwrap();

        let responses = h.platform.responses();
        let InteractionResponse::Reply(message) = &responses[1] else {
            panic!("day pick must post a new reply");
        };
        assert!(
            message
                .content
                .contains("```/set date:01/15 time_zone:Europe/Warsaw```")
        );
        assert_eq!(
            h.flow.sessions().get(USER).unwrap().phase,
            SelectionPhase::AwaitingConfirmation { day: 15 }
        );
        assert!(h.flow.nudges().is_pending(USER));
        assert!(h.platform.follow_ups().is_empty());

        tokio::time::sleep(NUDGE_DELAY * 3).await;

        let follow_ups = h.platform.follow_ups();
        assert_eq!(follow_ups.len(), 1);
        assert!(follow_ups[0].content.contains("<@7>"));
        assert!(matches!(follow_ups[0].components[0], ActionRow::Buttons { .. }));
    }

    #[tokio::test]
    async fn day_outside_month_is_rejected() {
        let h = harness();
        h.flow.handle(&pick_month(4)).await.unwrap();
        h.flow.handle(&pick_day(2, DayChoice::Day(31))).await.unwrap();

        let responses = h.platform.responses();
        assert!(responses[1].message().content.contains("od 1 do 30"));
        assert!(!h.flow.nudges().is_pending(USER));
    }

    #[tokio::test]
    async fn config_done_cancels_nudge_removes_role_and_session() {
        let h = harness();
        h.flow.handle(&pick_month(1)).await.unwrap();
        h.flow.handle(&pick_day(1, DayChoice::Day(15))).await.unwrap();

        h.flow
            .handle(&event_with_roles(ComponentAction::ConfigDone, vec![ROLE]))
            .await
            .unwrap();

        assert!(!h.flow.nudges().is_pending(USER));
        assert!(h.flow.sessions().get(USER).is_none());
        assert!(h.platform.calls().contains(&PlatformCall::RemoveRole {
            guild_id: GuildId(10),
            user_id: USER,
            role_id: ROLE,
        }));
        assert_eq!(
            h.platform.responses().last().unwrap().message().content,
            render::CONFIG_COMPLETE
        );

        tokio::time::sleep(NUDGE_DELAY * 3).await;
        assert!(h.platform.follow_ups().is_empty());
    }

    #[tokio::test]
    async fn config_done_without_role_skips_removal() {
        let h = harness();
        h.flow.handle(&event(ComponentAction::ConfigDone)).await.unwrap();

        assert!(
            !h.platform
                .calls()
                .iter()
                .any(|c| matches!(c, PlatformCall::RemoveRole { .. }))
        );
        assert_eq!(h.platform.responses().len(), 1);
    }

    #[tokio::test]
    async fn role_removal_failure_does_not_abort_confirmation() {
        let h = harness();
        h.platform
            .fail_role_removal
            .store(true, std::sync::atomic::Ordering::SeqCst);

        h.flow
            .handle(&event_with_roles(ComponentAction::ConfigDone, vec![ROLE]))
            .await
            .unwrap();

        assert_eq!(
            h.platform.responses()[0].message().content,
            render::CONFIG_COMPLETE
        );
    }

    #[tokio::test]
    async fn config_not_done_waits_and_nudges_again() {
        let h = harness();
        h.flow.handle(&event(ComponentAction::ConfigNotDone)).await.unwrap();

        let responses = h.platform.responses();
        assert!(responses[0].message().content.starts_with("Poczekam kolejne"));
        assert!(h.flow.nudges().is_pending(USER));

        tokio::time::sleep(NUDGE_DELAY * 3).await;
        assert_eq!(h.platform.follow_ups().len(), 1);
    }

    #[tokio::test]
    async fn new_month_pick_cancels_pending_nudge() {
        let h = harness();
        h.flow.handle(&pick_month(1)).await.unwrap();
        h.flow.handle(&pick_day(1, DayChoice::Day(3))).await.unwrap();
        assert!(h.flow.nudges().is_pending(USER));

        h.flow.handle(&pick_month(2)).await.unwrap();
        assert!(!h.flow.nudges().is_pending(USER));
        assert_eq!(h.flow.sessions().get(USER).unwrap().month.number(), 2);
    }

    #[tokio::test]
    async fn foreign_component_is_ignored() {
        let h = harness();
        h.flow
            .handle(&event(ComponentAction::Unknown {
                custom_id: "poll".to_string(),
            }))
            .await
            .unwrap();
        assert!(h.platform.calls().is_empty());
    }

    #[tokio::test]
    async fn reply_failure_propagates() {
        let h = harness();
        h.platform
            .fail_responses
            .store(true, std::sync::atomic::Ordering::SeqCst);

        let result = h.flow.handle(&pick_month(5)).await;
        assert!(matches!(result, Err(FlowError::Platform(_))));
    }
}
