use crate::database::models::UserRole;

/// Pick the dashboard route for a signed-in user.
///
/// Deliberately a flat two-way branch, not a role-resolution engine:
/// restaurant owners land on the restaurant home page, everyone else
/// (customers, accounts with no recognized role) on the customer dashboard.
pub fn resolve_dashboard(role: UserRole) -> &'static str {
    match role {
        UserRole::RestaurantOwner => "restaurant.home",
        UserRole::Customer => "customer.dashboard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_goes_to_restaurant_home() {
        assert_eq!(resolve_dashboard(UserRole::RestaurantOwner), "restaurant.home");
    }

    #[test]
    fn everyone_else_goes_to_customer_dashboard() {
        assert_eq!(resolve_dashboard(UserRole::Customer), "customer.dashboard");
        // Unknown and absent role values normalize to Customer before dispatch
        for raw in ["", "admin", "RESTAURANT", "owner"] {
            assert_eq!(resolve_dashboard(UserRole::parse(raw)), "customer.dashboard");
        }
        assert_eq!(resolve_dashboard(UserRole::parse("restaurant")), "restaurant.home");
    }
}
