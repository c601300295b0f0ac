//! Request context.
//!
//! Carries the host and locale a request arrived with. Only the homepage
//! selector reads these; path resolution is purely slug-based.

/// Host and locale of the incoming request.
///
/// Both fields are optional: a request may arrive without a usable Host
/// header, and locale negotiation may produce nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Requested host, without port.
    pub host: Option<String>,
    /// Negotiated locale (e.g. "en").
    pub locale: Option<String>,
}

impl RequestContext {
    /// Create an empty context (no host, no locale).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_is_empty() {
        let ctx = RequestContext::new();

        assert!(ctx.host.is_none());
        assert!(ctx.locale.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let ctx = RequestContext::new().with_host("localhost").with_locale("en");

        assert_eq!(ctx.host.as_deref(), Some("localhost"));
        assert_eq!(ctx.locale.as_deref(), Some("en"));
    }
}
