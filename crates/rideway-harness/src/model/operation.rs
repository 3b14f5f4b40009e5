//! Operations for model-based testing.
//!
//! Operations represent everything the auth collaborator and the user can do
//! to the router. They are generated randomly by proptest or the fuzzer and
//! applied to both the model and the real implementation.

use arbitrary::Arbitrary;
use rideway_core::{Identity, Role};

/// Role in the model (maps onto [`Role`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum ModelRole {
    /// Vendor account.
    Vendor,
    /// Driver account.
    Driver,
}

impl ModelRole {
    /// Real role.
    pub fn to_role(self) -> Role {
        match self {
            ModelRole::Vendor => Role::Vendor,
            ModelRole::Driver => Role::Driver,
        }
    }
}

/// Identity in the model. Users are small integers to keep the space tiny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub struct ModelIdentity {
    /// User number.
    pub user: u8,
    /// Role held.
    pub role: ModelRole,
}

impl ModelIdentity {
    /// Real identity with deterministic email and name.
    pub fn to_identity(self) -> Identity {
        Identity::new(
            u64::from(self.user),
            format!("user{}@rideway.test", self.user),
            format!("User {}", self.user),
            self.role.to_role(),
        )
    }
}

/// Operations that can be applied to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// Start a credential check, keeping the current identity.
    BeginCheck,

    /// Finish a credential check with the given outcome.
    Resolve {
        /// Signed-in identity, `None` for signed out.
        identity: Option<ModelIdentity>,
    },

    /// Navigate into a role's guarded tree.
    EnterTree {
        /// Tree being entered.
        role: ModelRole,
    },
}
