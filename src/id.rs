//! Snowflake ID newtypes.
//!
//! Discord IDs are 64-bit snowflakes. Each scope gets its own newtype so a
//! guild ID can't be passed where a user ID is expected.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// The raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type! {
    /// The ID of a guild (server).
    GuildId
}
id_type! {
    /// The ID of a user.
    UserId
}
id_type! {
    /// The ID of a channel.
    ChannelId
}
id_type! {
    /// The ID of a role.
    RoleId
}
