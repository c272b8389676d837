//! Capability checks for viewing and editing resources.
//!
//! One explicit decision point instead of ad hoc owner-equality tests
//! scattered across the presentation code.

/// What a viewer may do with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// View and edit.
    Full,
    /// View only.
    ReadOnly,
    /// Not visible at all.
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    VenueManager,
}

/// Decides access to a public venue listing. Listings are visible to
/// everyone; editing requires being the owner and holding the manager
/// role.
pub fn venue_permission(viewer: Option<&str>, owner: &str, viewer_role: Role) -> Permission {
    match viewer {
        Some(name) if name == owner && viewer_role == Role::VenueManager => Permission::Full,
        _ => Permission::ReadOnly,
    }
}

/// Decides access to a booking. Bookings are private to the customer
/// who made them; everyone else is denied outright rather than shown a
/// read-only view.
pub fn booking_permission(viewer: Option<&str>, owner: &str) -> Permission {
    match viewer {
        Some(name) if name == owner => Permission::Full,
        _ => Permission::Denied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owning_manager_can_edit_venue() {
        assert_eq!(
            venue_permission(Some("anna"), "anna", Role::VenueManager),
            Permission::Full
        );
    }

    #[test]
    fn owner_without_manager_role_cannot_edit() {
        assert_eq!(
            venue_permission(Some("anna"), "anna", Role::Customer),
            Permission::ReadOnly
        );
    }

    #[test]
    fn venues_are_public_read_only() {
        assert_eq!(
            venue_permission(Some("bob"), "anna", Role::VenueManager),
            Permission::ReadOnly
        );
        assert_eq!(
            venue_permission(None, "anna", Role::Customer),
            Permission::ReadOnly
        );
    }

    #[test]
    fn bookings_are_private() {
        assert_eq!(booking_permission(Some("anna"), "anna"), Permission::Full);
        assert_eq!(booking_permission(Some("bob"), "anna"), Permission::Denied);
        assert_eq!(booking_permission(None, "anna"), Permission::Denied);
    }
}
