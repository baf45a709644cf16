//! Hostname to tenant descriptor resolution.

use clinio_core::{Mode, Navigator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Header carrying the resolved subdomain to the backend.
pub const TENANT_HEADER: &str = "X-Tenant-Subdomain";

/// Tenant id of the public (central) context.
pub const PUBLIC_TENANT: &str = "public";

const LOCAL_LABEL: &str = "localhost";

/// Identity of the tenant addressed by a hostname.
///
/// Derived, never stored: recompute from the current location whenever the
/// tenant context matters, since navigation can change it without the client
/// being rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDescriptor {
    /// Leftmost hostname label when it names a tenant.
    pub subdomain: Option<String>,
    /// True when the hostname addresses the central application.
    pub is_public: bool,
    /// Hostname the descriptor was resolved from.
    pub hostname: String,
    /// Full URL at resolution time; empty when resolved from a bare hostname.
    pub full_url: String,
}

impl TenantDescriptor {
    /// The subdomain, or the literal `"public"` when there is none.
    pub fn tenant_id(&self) -> &str {
        self.subdomain.as_deref().unwrap_or(PUBLIC_TENANT)
    }

    /// Human-facing name: `Clinic {Subdomain}` or the central-system label.
    pub fn display_name(&self) -> String {
        match &self.subdomain {
            Some(subdomain) => format!("Clinic {}", capitalize(subdomain)),
            None => "Central System".to_string(),
        }
    }

    pub fn with_full_url(mut self, full_url: impl Into<String>) -> Self {
        self.full_url = full_url.into();
        self
    }
}

/// Resolve the tenant addressed by `hostname`.
///
/// Local hosts (development mode, or any hostname containing `localhost`)
/// treat a single leading label as the tenant: `northside.localhost` is the
/// tenant `northside`, bare `localhost` is public. Production hosts need more
/// than two labels for a tenant; the bare base domain and its `www` variant
/// are public. A two-label production hostname that matches neither is a
/// foreign or misconfigured deployment: it resolves to neither tenant nor
/// public, which leaves the request without a tenant header and lets the
/// backend fall back to its public schema.
pub fn resolve(hostname: &str, mode: Mode, base_domain: &str) -> TenantDescriptor {
    let labels: Vec<&str> = hostname.split('.').collect();

    let mut subdomain = None;
    let mut is_public = false;

    if mode.is_development() || hostname.contains(LOCAL_LABEL) {
        if labels.len() > 1 && labels[0] != LOCAL_LABEL {
            subdomain = Some(labels[0].to_string());
        } else {
            is_public = true;
        }
    } else if labels.len() > 2 {
        subdomain = Some(labels[0].to_string());
    } else if hostname == base_domain || hostname == format!("www.{}", base_domain) {
        is_public = true;
    } else {
        warn!(hostname, base_domain, "hostname matches neither a tenant nor the base domain");
    }

    TenantDescriptor {
        subdomain,
        is_public,
        hostname: hostname.to_string(),
        full_url: String::new(),
    }
}

/// Resolve from the live location held by a [`Navigator`].
pub fn resolve_current(
    navigator: &dyn Navigator,
    mode: Mode,
    base_domain: &str,
) -> TenantDescriptor {
    resolve(&navigator.hostname(), mode, base_domain).with_full_url(navigator.href())
}

/// The outbound tenant header: empty when no subdomain is resolved, exactly
/// one `X-Tenant-Subdomain` entry otherwise.
pub fn tenant_header(descriptor: &TenantDescriptor) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    if let Some(subdomain) = &descriptor.subdomain {
        headers.insert(TENANT_HEADER.to_string(), subdomain.clone());
    }
    headers
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
