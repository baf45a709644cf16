//! Subdomain-based tenant resolution.
//!
//! A tenant (clinic) is addressed by the leftmost hostname label:
//! `northside.clinio.app` and `northside.localhost` both resolve to the
//! tenant `northside`, while the bare base domain, its `www` variant, and
//! plain `localhost` resolve to the public (central) context. Resolution is
//! pure, with hostname, mode, and base domain as explicit inputs, so the
//! same descriptor logic serves the browser, tests, and the CLI.

pub mod access;
pub mod resolver;
pub mod routing;

pub use access::{validate_tenant_access, ADMIN_TENANT};
pub use resolver::{
    resolve, resolve_current, tenant_header, TenantDescriptor, PUBLIC_TENANT, TENANT_HEADER,
};
pub use routing::{redirect_to_tenant, tenant_origin};
