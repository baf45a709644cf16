//! Tenant access validation.

use crate::resolver::PUBLIC_TENANT;

/// Tenant id granting cross-tenant administrative access.
pub const ADMIN_TENANT: &str = "admin";

/// Whether a user bound to `user_tenant` may act on `current_tenant`.
///
/// Public and administrative users pass everywhere; everyone else only on
/// their own tenant.
pub fn validate_tenant_access(user_tenant: &str, current_tenant: &str) -> bool {
    if user_tenant == PUBLIC_TENANT || user_tenant == ADMIN_TENANT {
        return true;
    }
    user_tenant == current_tenant
}
