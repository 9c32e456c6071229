//! Platform snowflake identifiers.
//!
//! Each id kind gets its own newtype so a role id can never be passed where a
//! channel id is expected.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

snowflake_id!(
    /// A platform user.
    UserId
);
snowflake_id!(
    /// A text channel.
    ChannelId
);
snowflake_id!(
    /// A guild (server).
    GuildId
);
snowflake_id!(
    /// A guild role.
    RoleId
);
snowflake_id!(
    /// A posted message.
    MessageId
);
snowflake_id!(
    /// An interaction (menu selection or button click).
    InteractionId
);

impl UserId {
    /// Mention markup that pings the user when rendered.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}
