//! Role capabilities
//!
//! Authorization checks ask whether a role carries a capability instead
//! of switching on role names, so a new role only needs a new entry in
//! the capability table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::user::UserRole;

/// A discrete permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Create and modify bookings, run check-in and check-out
    ManageBookings,
    /// Create and modify customer records
    ManageCustomers,
    /// Issue bills and record payments
    ManageBilling,
    /// Create and modify rooms, room types, and services
    ManageInventory,
    /// Create, deactivate, and re-role user accounts
    ManageUsers,
    /// View occupancy and revenue reports
    ViewReports,
}

impl UserRole {
    /// Returns the set of capabilities this role carries
    pub fn capabilities(&self) -> HashSet<Capability> {
        use Capability::*;
        let granted: &[Capability] = match self {
            UserRole::Administrator => &[
                ManageBookings,
                ManageCustomers,
                ManageBilling,
                ManageInventory,
                ManageUsers,
                ViewReports,
            ],
            UserRole::Manager => &[
                ManageBookings,
                ManageCustomers,
                ManageBilling,
                ManageInventory,
                ViewReports,
            ],
            UserRole::Receptionist => &[ManageBookings, ManageCustomers, ManageBilling],
            UserRole::Staff => &[ManageBookings],
        };
        granted.iter().copied().collect()
    }

    /// Checks a single capability
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_administrator_has_every_capability() {
        for cap in [
            Capability::ManageBookings,
            Capability::ManageCustomers,
            Capability::ManageBilling,
            Capability::ManageInventory,
            Capability::ManageUsers,
            Capability::ViewReports,
        ] {
            assert!(UserRole::Administrator.can(cap));
        }
    }

    #[test]
    fn test_only_administrator_manages_users() {
        assert!(!UserRole::Manager.can(Capability::ManageUsers));
        assert!(!UserRole::Receptionist.can(Capability::ManageUsers));
        assert!(!UserRole::Staff.can(Capability::ManageUsers));
    }

    #[test]
    fn test_receptionist_front_desk_scope() {
        assert!(UserRole::Receptionist.can(Capability::ManageBookings));
        assert!(UserRole::Receptionist.can(Capability::ManageBilling));
        assert!(!UserRole::Receptionist.can(Capability::ManageInventory));
        assert!(!UserRole::Receptionist.can(Capability::ViewReports));
    }
}
