//! Global error policy.
//!
//! Exactly one policy fires per response, selected by status code. Policies
//! are side effects only; the originating error is always handed back to
//! the caller afterwards, so calling code can still branch on it.

use crate::client::ClinioClient;
use crate::models::ApiErrorBody;
use clinio_core::ClientEvent;
use clinio_tenant::resolve;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::error;

impl ClinioClient {
    /// Dispatch the side-effect policy for a failed response.
    pub(crate) fn apply_error_policy(&self, status: StatusCode, data: Option<&serde_json::Value>) {
        match status.as_u16() {
            404 => self.on_not_found(data),
            401 => self.on_unauthorized(),
            403 => self.on_forbidden(),
            500 => self.on_server_fault(),
            _ => {}
        }
    }

    /// A 404 only becomes a policy matter when the body says the tenant
    /// itself is gone; ordinary missing resources stay with the caller.
    fn on_not_found(&self, data: Option<&serde_json::Value>) {
        let body = data.map(ApiErrorBody::from_value).unwrap_or_default();
        if !body.mentions_tenant() {
            return;
        }

        let descriptor = resolve(
            &self.navigator.hostname(),
            self.config.mode,
            &self.config.base_domain,
        );
        error!(tenant = descriptor.tenant_id(), "tenant not found or inactive");

        let redirect_to = self.config.public_origin().to_string();
        self.events.publish(ClientEvent::TenantNotFound {
            tenant_id: descriptor.tenant_id().to_string(),
            display_name: descriptor.display_name(),
            redirect_to: redirect_to.clone(),
        });

        // Leave the dead tenant after a grace period; the failing call's
        // error has long been returned by then.
        let navigator = Arc::clone(&self.navigator);
        let delay = self.config.redirect_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(&redirect_to);
        });
    }

    /// Credentials are cleared together; the tenant context survives so the
    /// user lands on their own clinic's login page.
    fn on_unauthorized(&self) {
        error!("unauthenticated or expired token");
        self.store.clear_credentials();

        let login_path = self.config.login_path.clone();
        if self.navigator.path().contains(&login_path) {
            self.events
                .publish(ClientEvent::SessionExpired { redirect_to: None });
        } else {
            self.events.publish(ClientEvent::SessionExpired {
                redirect_to: Some(login_path.clone()),
            });
            self.navigator.navigate(&login_path);
        }
    }

    fn on_forbidden(&self) {
        error!("access denied");
        self.events.publish(ClientEvent::ActionForbidden);
    }

    fn on_server_fault(&self) {
        error!("internal server error");
        self.events.publish(ClientEvent::ServerFault);
    }
}
