//! Fixed URL templates for every Chronicle API operation.
//!
//! All paths hang off `{base}/chronicle`. A replica scope inserts
//! `/replica/{source}` after that prefix. Caller-supplied segments (hashes,
//! sources) are percent-encoded by [`url::PathSegmentsMut::push`].

use url::Url;

use crate::error::{ChronicleError, ChronicleResult};

const API_ROOT: &str = "chronicle";
const REPLICA: &str = "replica";

/// A logical API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `GET /chronicle`
    Index,
    /// `GET /chronicle/lasthash`
    LastHash,
    /// `GET /chronicle/lookup/{hash}`
    Lookup(&'a str),
    /// `GET /chronicle/since/{hash}`
    Since(&'a str),
    /// `GET /chronicle/export`
    Export,
    /// `POST /chronicle/register`
    Register,
    /// `POST /chronicle/revoke`
    Revoke,
    /// `POST /chronicle/publish`
    Publish,
    /// `GET /chronicle/replica`
    Replicas,
}

impl<'a> Route<'a> {
    /// Short operation name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::LastHash => "lasthash",
            Self::Lookup(_) => "lookup",
            Self::Since(_) => "since",
            Self::Export => "export",
            Self::Register => "register",
            Self::Revoke => "revoke",
            Self::Publish => "publish",
            Self::Replicas => "replicas",
        }
    }

    /// The caller-supplied path parameter, if the route has one.
    #[must_use]
    pub const fn param(&self) -> Option<&'a str> {
        match *self {
            Self::Lookup(hash) | Self::Since(hash) => Some(hash),
            _ => None,
        }
    }

    fn segments(&self) -> [Option<&'a str>; 2] {
        match *self {
            Self::Index => [None, None],
            Self::LastHash => [Some("lasthash"), None],
            Self::Lookup(hash) => [Some("lookup"), Some(hash)],
            Self::Since(hash) => [Some("since"), Some(hash)],
            Self::Export => [Some("export"), None],
            Self::Register => [Some("register"), None],
            Self::Revoke => [Some("revoke"), None],
            Self::Publish => [Some("publish"), None],
            Self::Replicas => [Some(REPLICA), None],
        }
    }
}

/// Resolves [`Route`]s against a base URL, optionally scoped to a replica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    base: Url,
    source: Option<String>,
}

impl Routes {
    /// Parse and validate the ledger base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::InvalidBaseUrl`] if the URL does not parse,
    /// cannot carry path segments (e.g. `mailto:`), or has a query or fragment.
    pub fn new(base_url: &str) -> ChronicleResult<Self> {
        let invalid = |reason: String| ChronicleError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".into()));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed".into()));
        }

        Ok(Self { base, source: None })
    }

    /// The same base URL, scoped to replica `source`.
    #[must_use]
    pub fn replica(&self, source: impl Into<String>) -> Self {
        Self {
            base: self.base.clone(),
            source: Some(source.into()),
        }
    }

    /// Replica source this table is scoped to, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The parsed base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for `route`.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::InvalidPathSegment`] if the replica source or
    /// a route parameter is `.` or `..`. URL path parsing resolves those (even
    /// percent-encoded) against the preceding segments.
    pub fn url(&self, route: Route<'_>) -> ChronicleResult<String> {
        let params = self.source.as_deref().into_iter().chain(route.param());
        for segment in params {
            if is_dot_segment(segment) {
                return Err(ChronicleError::InvalidPathSegment(segment.to_string()));
            }
        }

        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(API_ROOT);
            if let Some(source) = &self.source {
                path.push(REPLICA).push(source);
            }
            for segment in route.segments().into_iter().flatten() {
                path.push(segment);
            }
        }
        Ok(url.into())
    }
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> Routes {
        Routes::new("http://ledger.test").unwrap()
    }

    #[test]
    fn test_primary_templates() {
        let r = routes();
        assert_eq!(r.url(Route::Index).unwrap(), "http://ledger.test/chronicle");
        assert_eq!(r.url(Route::LastHash).unwrap(), "http://ledger.test/chronicle/lasthash");
        assert_eq!(
            r.url(Route::Lookup("foo")).unwrap(),
            "http://ledger.test/chronicle/lookup/foo"
        );
        assert_eq!(
            r.url(Route::Since("foo")).unwrap(),
            "http://ledger.test/chronicle/since/foo"
        );
        assert_eq!(r.url(Route::Export).unwrap(), "http://ledger.test/chronicle/export");
        assert_eq!(r.url(Route::Register).unwrap(), "http://ledger.test/chronicle/register");
        assert_eq!(r.url(Route::Revoke).unwrap(), "http://ledger.test/chronicle/revoke");
        assert_eq!(r.url(Route::Publish).unwrap(), "http://ledger.test/chronicle/publish");
        assert_eq!(r.url(Route::Replicas).unwrap(), "http://ledger.test/chronicle/replica");
    }

    #[test]
    fn test_replica_templates() {
        let r = routes().replica("src1");
        assert_eq!(r.source(), Some("src1"));
        assert_eq!(
            r.url(Route::LastHash).unwrap(),
            "http://ledger.test/chronicle/replica/src1/lasthash"
        );
        assert_eq!(
            r.url(Route::Lookup("foo")).unwrap(),
            "http://ledger.test/chronicle/replica/src1/lookup/foo"
        );
        assert_eq!(
            r.url(Route::Since("foo")).unwrap(),
            "http://ledger.test/chronicle/replica/src1/since/foo"
        );
        assert_eq!(
            r.url(Route::Export).unwrap(),
            "http://ledger.test/chronicle/replica/src1/export"
        );
    }

    #[test]
    fn test_caller_segments_are_percent_encoded() {
        let r = routes();
        assert_eq!(
            r.url(Route::Lookup("a b/c?d#e%")).unwrap(),
            "http://ledger.test/chronicle/lookup/a%20b%2Fc%3Fd%23e%25"
        );

        let replica = r.replica("my/source");
        assert_eq!(
            replica.url(Route::Export).unwrap(),
            "http://ledger.test/chronicle/replica/my%2Fsource/export"
        );
    }

    #[test]
    fn test_base64url_hash_is_untouched() {
        let hash = "n3p7H8mpIySQAjs4T_bE-9LFHmzoXwRN9_k9FJV0WgA=";
        assert_eq!(
            routes().url(Route::Since(hash)).unwrap(),
            format!("http://ledger.test/chronicle/since/{hash}")
        );
    }

    #[test]
    fn test_base_with_path_and_trailing_slash() {
        let r = Routes::new("https://example.org/ledger/").unwrap();
        assert_eq!(
            r.url(Route::LastHash).unwrap(),
            "https://example.org/ledger/chronicle/lasthash"
        );

        let r = Routes::new("https://example.org/ledger").unwrap();
        assert_eq!(r.url(Route::Index).unwrap(), "https://example.org/ledger/chronicle");
    }

    #[test]
    fn test_invalid_base_urls() {
        assert!(matches!(
            Routes::new("not a url"),
            Err(ChronicleError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Routes::new("mailto:ledger@example.org"),
            Err(ChronicleError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Routes::new("http://ledger.test/?x=1"),
            Err(ChronicleError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Route::Lookup("x").name(), "lookup");
        assert_eq!(Route::Replicas.name(), "replicas");
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let r = routes();
        for segment in [".", ".."] {
            assert!(matches!(
                r.url(Route::Lookup(segment)),
                Err(ChronicleError::InvalidPathSegment(s)) if s == segment
            ));
            assert!(matches!(
                r.url(Route::Since(segment)),
                Err(ChronicleError::InvalidPathSegment(_))
            ));

            let replica = r.replica(segment);
            assert!(matches!(
                replica.url(Route::LastHash),
                Err(ChronicleError::InvalidPathSegment(_))
            ));
            assert!(matches!(
                r.replica("src1").url(Route::Lookup(segment)),
                Err(ChronicleError::InvalidPathSegment(_))
            ));
        }
    }

    #[test]
    fn test_dotted_names_are_not_dot_segments() {
        let r = routes();
        assert_eq!(
            r.url(Route::Lookup("...")).unwrap(),
            "http://ledger.test/chronicle/lookup/..."
        );
        assert_eq!(
            r.replica(".hidden").url(Route::Export).unwrap(),
            "http://ledger.test/chronicle/replica/.hidden/export"
        );
        assert_eq!(Route::Since("abc").param(), Some("abc"));
        assert_eq!(Route::Export.param(), None);
    }
}
