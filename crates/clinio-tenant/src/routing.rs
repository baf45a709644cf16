//! Tenant-aware navigation targets.

use crate::resolver::{resolve, PUBLIC_TENANT};
use clinio_core::{ClientConfig, Navigator};
use tracing::debug;

/// Origin serving `tenant_id` under the current configuration.
///
/// The public tenant maps to the central application origin. Development
/// tenant origins are derived by prefixing the tenant onto the configured dev
/// origin's host (`http://northside.localhost:5173`); production tenants live
/// at `https://{tenant}.{base_domain}`.
pub fn tenant_origin(tenant_id: &str, config: &ClientConfig) -> String {
    if tenant_id == PUBLIC_TENANT {
        return config.public_origin().to_string();
    }

    if config.mode.is_development() {
        match config.dev_app_origin.split_once("://") {
            Some((scheme, host)) => format!("{}://{}.{}", scheme, tenant_id, host),
            None => format!("http://{}.{}", tenant_id, config.dev_app_origin),
        }
    } else {
        format!("https://{}.{}", tenant_id, config.base_domain)
    }
}

/// Navigate to `target_tenant_id`'s origin, unless the current location
/// already resolves to that tenant.
pub fn redirect_to_tenant(
    navigator: &dyn Navigator,
    target_tenant_id: &str,
    config: &ClientConfig,
) {
    let current = resolve(&navigator.hostname(), config.mode, &config.base_domain);
    if current.tenant_id() == target_tenant_id {
        return;
    }

    let target = tenant_origin(target_tenant_id, config);
    debug!(from = current.tenant_id(), to = target_tenant_id, %target, "switching tenant");
    navigator.navigate(&target);
}
