/*!
 * Server address normalization
 *
 * Addresses arrive in two shapes: a bare host/IP ("10.0.0.5",
 * "myemby.example.com:8096") or a scheme-prefixed URL
 * ("https://myemby.example.com:8096"). Hand-off and probing both need a
 * fully-qualified URL, built by the same rule in either case.
 */

/// Default Emby HTTP port, used when the address carries no scheme
pub const DEFAULT_PORT: u16 = 8096;

/// Path of the Emby web client, appended for hand-off
pub const WEB_PATH: &str = "/web/index.html";

/// Emby's unauthenticated system-info endpoint, used for reachability probes
pub const PROBE_PATH: &str = "/System/Info/Public";

/// Whether the address already carries a URI scheme prefix
pub fn has_scheme(addr: &str) -> bool {
    addr.starts_with("http://") || addr.starts_with("https://")
}

/// Build the fully-qualified web URL for hand-off.
///
/// Scheme-prefixed addresses get the web path appended as-is; bare hosts are
/// wrapped in `http://{host}:{port}`. Appending is idempotent: an address that
/// already ends with the web path is returned unchanged.
pub fn web_url(addr: &str, port: u16) -> String {
    qualified_url(addr, port, WEB_PATH)
}

/// Build the URL of the reachability probe endpoint for an address
pub fn probe_url(addr: &str, port: u16) -> String {
    qualified_url(addr, port, PROBE_PATH)
}

fn qualified_url(addr: &str, port: u16, path: &str) -> String {
    let base = if has_scheme(addr) {
        // Strip at most one trailing slash; stripping all of them would
        // collapse a degenerate "http://" down to "http:"
        addr.strip_suffix('/').unwrap_or(addr).to_string()
    } else {
        format!("http://{}:{}", addr, port)
    };

    if base.ends_with(path) {
        base
    } else {
        format!("{}{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_scheme_and_port() {
        assert_eq!(
            web_url("10.0.0.5", DEFAULT_PORT),
            "http://10.0.0.5:8096/web/index.html"
        );
    }

    #[test]
    fn test_scheme_prefixed_address_kept_verbatim() {
        assert_eq!(
            web_url("https://myemby.example.com:8096", DEFAULT_PORT),
            "https://myemby.example.com:8096/web/index.html"
        );
    }

    #[test]
    fn test_http_scheme_detected() {
        assert!(has_scheme("http://10.0.0.5"));
        assert!(has_scheme("https://10.0.0.5"));
        assert!(!has_scheme("10.0.0.5"));
        assert!(!has_scheme("myemby.example.com:8096"));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = web_url("https://myemby.example.com", DEFAULT_PORT);
        let twice = web_url(&once, DEFAULT_PORT);
        assert_eq!(once, twice);
        assert_eq!(twice.matches(WEB_PATH).count(), 1);
    }

    #[test]
    fn test_trailing_slash_stripped_before_append() {
        assert_eq!(
            web_url("http://10.0.0.5:8096/", DEFAULT_PORT),
            "http://10.0.0.5:8096/web/index.html"
        );
    }

    #[test]
    fn test_bare_scheme_keeps_url_shape() {
        // A lone scheme is never a reachable server, but the built URL must
        // stay scheme-shaped so the probe fails cleanly instead of
        // reinterpreting the authority
        assert!(probe_url("http://", DEFAULT_PORT).starts_with("http://"));
        assert!(web_url("https://", DEFAULT_PORT).starts_with("https://"));
    }

    #[test]
    fn test_probe_url_uses_system_info_endpoint() {
        assert_eq!(
            probe_url("10.0.0.5", DEFAULT_PORT),
            "http://10.0.0.5:8096/System/Info/Public"
        );
        assert_eq!(
            probe_url("https://myemby.example.com:8096", DEFAULT_PORT),
            "https://myemby.example.com:8096/System/Info/Public"
        );
    }

    #[test]
    fn test_custom_port_used_for_bare_hosts_only() {
        assert_eq!(web_url("10.0.0.5", 8920), "http://10.0.0.5:8920/web/index.html");
        // Scheme-prefixed addresses carry their own port; config port is ignored
        assert_eq!(
            web_url("http://10.0.0.5:8096", 8920),
            "http://10.0.0.5:8096/web/index.html"
        );
    }
}
