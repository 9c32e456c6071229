//! Inbound platform events.
//!
//! The adapter converts every gateway event it cares about into an
//! `InboundEvent`. Component interactions are decoded from their custom id
//! and selected values into a `ComponentAction` up front, so the selection
//! flow matches on variants instead of inspecting id prefixes.

use serde::{Deserialize, Serialize};

use crate::error::InteractionError;
use crate::ids::{ChannelId, GuildId, InteractionId, MessageId, RoleId, UserId};
use crate::selection::{DayChoice, MonthChoice};

/// Custom id of the month select menu.
pub const SELECT_MONTH_ID: &str = "select_month";
/// Prefix of day select menu custom ids; the page number follows.
pub const SELECT_DAY_PREFIX: &str = "select_day_page";
/// Custom id of the "configuration done" button.
pub const CONFIG_DONE_ID: &str = "config_done";
/// Custom id of the "configuration not done" button.
pub const CONFIG_NOT_DONE_ID: &str = "config_not_done";

/// Custom id for the day menu showing `page`.
pub fn day_menu_id(page: u32) -> String {
    format!("{SELECT_DAY_PREFIX}{page}")
}

/// Everything needed to answer an interaction, now or later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRef {
    pub id: InteractionId,
    pub token: String,
}

/// A plain-text message posted in a guild channel.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub author_id: UserId,
    pub author_is_bot: bool,
    /// Roles the author holds, when the message came from a guild member.
    pub author_roles: Vec<RoleId>,
    pub content: String,
}

/// A select-menu or button interaction.
#[derive(Debug, Clone)]
pub struct ComponentEvent {
    pub interaction: InteractionRef,
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
    /// Roles of the invoking member, empty outside guilds.
    pub member_roles: Vec<RoleId>,
    pub action: ComponentAction,
}

/// Decoded meaning of a component interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentAction {
    MonthSelected(MonthChoice),
    DaySelected { page: u32, choice: DayChoice },
    ConfigDone,
    ConfigNotDone,
    /// A component this bot does not own.
    Unknown { custom_id: String },
}

impl ComponentAction {
    /// Decode a component interaction from its custom id and selected values.
    ///
    /// Buttons carry no values; select menus carry exactly one.
    pub fn parse(custom_id: &str, values: &[String]) -> Result<Self, InteractionError> {
        let first_value = || values.first().ok_or(InteractionError::MissingValue);

        match custom_id {
            SELECT_MONTH_ID => Ok(ComponentAction::MonthSelected(first_value()?.parse()?)),
            CONFIG_DONE_ID => Ok(ComponentAction::ConfigDone),
            CONFIG_NOT_DONE_ID => Ok(ComponentAction::ConfigNotDone),
            id => match id.strip_prefix(SELECT_DAY_PREFIX) {
                Some(page) => {
                    let page = page
                        .parse::<u32>()
                        .map_err(|_| InteractionError::InvalidPage(id.to_string()))?;
                    Ok(ComponentAction::DaySelected {
                        page,
                        choice: first_value()?.parse()?,
                    })
                }
                None => Ok(ComponentAction::Unknown {
                    custom_id: id.to_string(),
                }),
            },
        }
    }
}

/// Every inbound event the bot reacts to.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    Message(IncomingMessage),
    Component(ComponentEvent),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::Month;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_month_menu() {
        let action = ComponentAction::parse("select_month", &values(&["2"])).unwrap();
        assert_eq!(
            action,
            ComponentAction::MonthSelected(MonthChoice::Month(Month::new(2).unwrap()))
        );

        let action = ComponentAction::parse("select_month", &values(&["none"])).unwrap();
        assert_eq!(action, ComponentAction::MonthSelected(MonthChoice::Neutral));
    }

    #[test]
    fn parse_day_menu_carries_page() {
        let action = ComponentAction::parse("select_day_page3", &values(&["next_page"])).unwrap();
        assert_eq!(
            action,
            ComponentAction::DaySelected {
                page: 3,
                choice: DayChoice::NextPage
            }
        );
    }

    #[test]
    fn parse_day_menu_rejects_bad_page() {
        let err = ComponentAction::parse("select_day_pageX", &values(&["1"])).unwrap_err();
        assert_eq!(err, InteractionError::InvalidPage("select_day_pageX".to_string()));
    }

    #[test]
    fn parse_select_without_value_errors() {
        let err = ComponentAction::parse("select_month", &[]).unwrap_err();
        assert_eq!(err, InteractionError::MissingValue);
    }

    #[test]
    fn parse_buttons() {
        assert_eq!(
            ComponentAction::parse("config_done", &[]).unwrap(),
            ComponentAction::ConfigDone
        );
        assert_eq!(
            ComponentAction::parse("config_not_done", &[]).unwrap(),
            ComponentAction::ConfigNotDone
        );
    }

    #[test]
    fn parse_foreign_component_is_unknown() {
        let action = ComponentAction::parse("poll_vote", &values(&["a"])).unwrap();
        assert!(matches!(action, ComponentAction::Unknown { ref custom_id } if custom_id == "poll_vote"));
    }

    #[test]
    fn day_menu_id_is_parsed_back() {
        let id = day_menu_id(2);
        assert_eq!(id, "select_day_page2");
        let action = ComponentAction::parse(&id, &values(&["9"])).unwrap();
        assert_eq!(
            action,
            ComponentAction::DaySelected {
                page: 2,
                choice: DayChoice::Day(9)
            }
        );
    }
}
