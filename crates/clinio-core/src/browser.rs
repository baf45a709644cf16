//! Location and navigation capability.
//!
//! A browser host implements [`Navigator`] over `window.location`; everything
//! else (tests, the CLI) uses [`FixedLocation`].

use parking_lot::RwLock;

/// Access to the current location plus the ability to perform a full
/// navigation. Implementations must tolerate being called from any task.
pub trait Navigator: Send + Sync {
    /// Hostname of the current location, e.g. `northside.clinio.app`.
    fn hostname(&self) -> String;

    /// Path of the current location, e.g. `/dashboard`.
    fn path(&self) -> String;

    /// Full URL of the current location.
    fn href(&self) -> String;

    /// Perform a full navigation to `url` (absolute URL or absolute path).
    fn navigate(&self, url: &str);
}

#[derive(Debug, Clone)]
struct Location {
    scheme: String,
    hostname: String,
    path: String,
}

/// A [`Navigator`] over an explicitly held location.
///
/// Navigations update the held location and are recorded in order, which lets
/// tests assert on exactly what was visited.
pub struct FixedLocation {
    location: RwLock<Location>,
    visited: RwLock<Vec<String>>,
}

impl FixedLocation {
    pub fn new(hostname: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            location: RwLock::new(Location {
                scheme: "http".to_string(),
                hostname: hostname.into(),
                path: path.into(),
            }),
            visited: RwLock::new(Vec::new()),
        }
    }

    pub fn with_scheme(self, scheme: impl Into<String>) -> Self {
        self.location.write().scheme = scheme.into();
        self
    }

    /// Every navigation target seen so far, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.visited.read().clone()
    }

    fn apply(&self, url: &str) {
        let mut location = self.location.write();
        if let Some(path) = url.strip_prefix('/') {
            location.path = format!("/{}", path);
            return;
        }
        let (scheme, rest) = match url.split_once("://") {
            Some((scheme, rest)) => (scheme.to_string(), rest),
            None => (location.scheme.clone(), url),
        };
        let (hostname, path) = match rest.split_once('/') {
            Some((host, path)) => (host.to_string(), format!("/{}", path)),
            None => (rest.to_string(), "/".to_string()),
        };
        location.scheme = scheme;
        location.hostname = hostname;
        location.path = path;
    }
}

impl Navigator for FixedLocation {
    fn hostname(&self) -> String {
        self.location.read().hostname.clone()
    }

    fn path(&self) -> String {
        self.location.read().path.clone()
    }

    fn href(&self) -> String {
        let location = self.location.read();
        format!("{}://{}{}", location.scheme, location.hostname, location.path)
    }

    fn navigate(&self, url: &str) {
        self.visited.write().push(url.to_string());
        self.apply(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_composition() {
        let nav = FixedLocation::new("northside.localhost", "/dashboard");
        assert_eq!(nav.href(), "http://northside.localhost/dashboard");
    }

    #[test]
    fn test_navigate_to_path_keeps_host() {
        let nav = FixedLocation::new("northside.localhost", "/dashboard");
        nav.navigate("/login");

        assert_eq!(nav.hostname(), "northside.localhost");
        assert_eq!(nav.path(), "/login");
        assert_eq!(nav.visited(), vec!["/login".to_string()]);
    }

    #[test]
    fn test_navigate_to_absolute_url() {
        let nav = FixedLocation::new("northside.localhost", "/dashboard");
        nav.navigate("https://clinio.app/welcome");

        assert_eq!(nav.hostname(), "clinio.app");
        assert_eq!(nav.path(), "/welcome");
        assert_eq!(nav.href(), "https://clinio.app/welcome");
    }
}
