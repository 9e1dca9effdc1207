//! Acting principal and the access guard.
//!
//! Every service call receives an explicit [`Principal`] carrying an
//! immutable role set; [`authorize`] is a pure function deciding whether a
//! principal may perform an action. Session handling and role provisioning
//! live outside the domain.

use std::collections::BTreeSet;

use crate::domain::Error;

/// Fallback identity recorded in audit fields for anonymous actors.
const SYSTEM_ACTOR: &str = "system";

/// Roles recognised by the access guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// May mutate the catalog in addition to reading it.
    Admin,
    /// May read the catalog.
    User,
}

impl Role {
    /// Stable name used in session storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parse a stored role name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// The actor behind a request: either a guest or an authenticated user with
/// an identifier and a role set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    actor_id: Option<String>,
    roles: BTreeSet<Role>,
}

impl Principal {
    /// Anonymous principal with no roles.
    pub fn guest() -> Self {
        Self {
            actor_id: None,
            roles: BTreeSet::new(),
        }
    }

    /// Authenticated principal with the given identifier and roles.
    pub fn authenticated(
        actor_id: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            actor_id: Some(actor_id.into()),
            roles: roles.into_iter().collect(),
        }
    }

    /// Whether this principal carries an authenticated identity.
    pub fn is_authenticated(&self) -> bool {
        self.actor_id.is_some()
    }

    /// Whether this principal holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Authenticated identifier, if any.
    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    /// Identity recorded in audit fields; anonymous actors stamp `system`.
    pub fn audit_name(&self) -> &str {
        self.actor_id.as_deref().unwrap_or(SYSTEM_ACTOR)
    }
}

/// Actions subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// List or search categories and products.
    ReadCatalog,
    /// Create, edit, or soft-delete categories and products.
    MutateCatalog,
    /// Place a guest order.
    PlaceOrder,
    /// List orders or fetch order details.
    ReadOrders,
    /// Hard-delete an order.
    DeleteOrder,
}

/// Decide whether `principal` may perform `action`.
///
/// Catalog reads require any authenticated identity, catalog mutation the
/// `admin` role; the order surface is open to guests.
pub fn authorize(principal: &Principal, action: Action) -> Result<(), Error> {
    match action {
        Action::ReadCatalog => {
            if principal.is_authenticated() {
                Ok(())
            } else {
                Err(Error::unauthorized("login required"))
            }
        }
        Action::MutateCatalog => {
            if !principal.is_authenticated() {
                Err(Error::unauthorized("login required"))
            } else if principal.has_role(Role::Admin) {
                Ok(())
            } else {
                Err(Error::forbidden("admin role required"))
            }
        }
        Action::PlaceOrder | Action::ReadOrders | Action::DeleteOrder => Ok(()),
    }
}
