//! Typed agent identifiers.
//!
//! Guardians and seedlings carry distinct uuid-backed id types so that a
//! guardian id can never be passed where a seedling id is expected. Ids are
//! random (v4); nothing in the climate computation depends on their value.

use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with the standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a [`Guardian`](crate::guardian::Guardian).
    GuardianId
}

define_id! {
    /// Identifier of a [`Seedling`](crate::seedling::Seedling).
    SeedlingId
}

/// Either kind of agent, used where an error or notice names an agent
/// without caring about its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentRef {
    /// A guardian.
    Guardian(GuardianId),
    /// A seedling.
    Seedling(SeedlingId),
}

impl core::fmt::Display for AgentRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AgentRef::Guardian(id) => write!(f, "guardian {id}"),
            AgentRef::Seedling(id) => write!(f, "seedling {id}"),
        }
    }
}

impl From<GuardianId> for AgentRef {
    fn from(id: GuardianId) -> Self {
        AgentRef::Guardian(id)
    }
}

impl From<SeedlingId> for AgentRef {
    fn from(id: SeedlingId) -> Self {
        AgentRef::Seedling(id)
    }
}
