//! Plain-text chat commands.
//!
//! `!start` opens the month menu. `/set date:<MM/DD> time_zone:<TZ>` is the
//! command users paste back into the guarded channel.

use thiserror::Error;

pub const START_COMMAND: &str = "!start";

const SET_PREFIX: &str = "/set";
const DATE_KEY: &str = "date:";
const TIME_ZONE_KEY: &str = "time_zone:";

/// Whether a message is exactly the start command.
pub fn is_start_command(content: &str) -> bool {
    content == START_COMMAND
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetCommandError {
    #[error("missing date argument")]
    MissingDate,

    #[error("missing time_zone argument")]
    MissingTimeZone,
}

/// A parsed `/set` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCommand {
    pub date: String,
    pub time_zone: String,
}

impl SetCommand {
    /// Whether the text is meant as a `/set` command at all.
    pub fn matches(content: &str) -> bool {
        content.starts_with(SET_PREFIX)
    }

    /// Parse the space-separated `key:value` arguments of a `/set` command.
    ///
    /// The first token of each kind wins; empty values count as missing.
    pub fn parse(content: &str) -> Result<Self, SetCommandError> {
        let argument = |key: &str| {
            content
                .split(' ')
                .find(|token| token.starts_with(key))
                .and_then(|token| token.split_once(':'))
                .map(|(_, value)| value)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let date = argument(DATE_KEY).ok_or(SetCommandError::MissingDate)?;
        let time_zone = argument(TIME_ZONE_KEY).ok_or(SetCommandError::MissingTimeZone)?;
        Ok(Self { date, time_zone })
    }
}
