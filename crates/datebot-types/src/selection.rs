//! Month/day selection model.
//!
//! A `UserSelection` is the in-progress state a user accumulates while
//! walking through the month menu, the paged day menu and the confirmation
//! prompt. Menu values arrive as strings and are decoded into `MonthChoice`
//! and `DayChoice`.

use serde::{Deserialize, Serialize};

use std::str::FromStr;

use crate::error::InteractionError;
use crate::ids::UserId;
use crate::month::Month;

/// Menu value of the neutral month entry.
pub const NONE_VALUE: &str = "none";
/// Menu value of the "previous page" navigation entry.
pub const PREVIOUS_PAGE_VALUE: &str = "previous_page";
/// Menu value of the "next page" navigation entry.
pub const NEXT_PAGE_VALUE: &str = "next_page";

/// Where a user is in the selection flow once a month is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SelectionPhase {
    /// Paging through the day menu.
    AwaitingDay { page: u32 },
    /// Day picked, command shown, waiting for the user to confirm.
    AwaitingConfirmation { day: u32 },
}

/// A user's in-progress selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelection {
    pub user_id: UserId,
    pub month: Month,
    pub phase: SelectionPhase,
}

impl UserSelection {
    /// Fresh selection right after a month pick, on the first day page.
    pub fn new(user_id: UserId, month: Month) -> Self {
        Self {
            user_id,
            month,
            phase: SelectionPhase::AwaitingDay { page: 1 },
        }
    }
}

/// One entry in the paged day menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOption {
    pub label: String,
    pub description: String,
    pub value: String,
}

/// Decoded value of the month menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthChoice {
    /// The neutral placeholder entry.
    Neutral,
    Month(Month),
}

impl FromStr for MonthChoice {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NONE_VALUE {
            Ok(MonthChoice::Neutral)
        } else {
            Ok(MonthChoice::Month(s.parse()?))
        }
    }
}

/// Decoded value of a day menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayChoice {
    PreviousPage,
    NextPage,
    Day(u32),
}

impl FromStr for DayChoice {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PREVIOUS_PAGE_VALUE => Ok(DayChoice::PreviousPage),
            NEXT_PAGE_VALUE => Ok(DayChoice::NextPage),
            other => other
                .parse::<u32>()
                .map(DayChoice::Day)
                .map_err(|_| InteractionError::InvalidValue(other.to_string())),
        }
    }
}
