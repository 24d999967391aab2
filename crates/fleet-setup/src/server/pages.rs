//! HTML pages for the setup server.

use url::Url;

use crate::models::SetupSummary;

/// Values interpolated into the index page.
#[derive(Debug, Clone)]
pub struct IndexPage<'a> {
    pub domain: &'a str,
    pub client_id: &'a str,
    pub scopes: &'a str,
    pub state: &'a str,
    pub nonce: &'a str,
    /// Fully built authorization URL.
    pub authorize_url: &'a Url,
    pub public_key_url: &'a str,
    /// Status code from a failed registration attempt.
    pub error: Option<&'a str>,
    pub success: bool,
}

const STYLE: &str = r"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f5f5; margin: 0; display: flex; justify-content: center; min-height: 100vh; }
.card { background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); padding: 32px; max-width: 640px; width: 100%; margin: 32px 16px; }
h1 { font-size: 20px; margin: 0 0 8px; color: #333; }
h2 { font-size: 16px; margin: 24px 0 8px; color: #333; }
p, li { color: #555; font-size: 14px; line-height: 1.5; }
code, pre { background: #f0f0f0; border-radius: 4px; padding: 2px 4px; font-size: 13px; }
pre { padding: 12px; overflow-x: auto; white-space: pre-wrap; word-break: break-all; }
a.button { display: inline-block; padding: 10px 16px; background: #4a90d9; color: #fff; border-radius: 4px; text-decoration: none; font-size: 14px; font-weight: 500; }
a.button:hover { background: #357abd; }
.error { background: #fee; border: 1px solid #c00; color: #c00; padding: 10px; border-radius: 4px; margin-bottom: 16px; }
.success { background: #efe; border: 1px solid #080; color: #080; padding: 10px; border-radius: 4px; margin-bottom: 16px; }
";

/// Render the setup landing page.
///
/// All parameters are HTML-escaped.
#[must_use]
pub fn render_index(page: &IndexPage<'_>) -> String {
    let mut banner = String::new();
    if let Some(status) = page.error {
        banner.push_str(&format!(
            r#"<div class="error">Partner account registration failed (HTTP {}). Check the server log for details.</div>"#,
            html_escape(status)
        ));
    }
    if page.success {
        banner.push_str(r#"<div class="success">Partner account registered.</div>"#);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Tesla Fleet API Setup</title>
<style>{style}</style>
</head>
<body>
<div class="card">
<h1>Tesla Fleet API Setup</h1>
<p>Domain <code>{domain}</code>, client ID <code>{client_id}</code>.</p>
{banner}
<h2>1. Public key</h2>
<p>The public key must be reachable at <a href="{public_key_url}">{public_key_url}</a> before registering.</p>
<h2>2. Register partner account</h2>
<p><a class="button" href="/register-partner-account">Register partner account</a></p>
<h2>3. Generate OAuth token</h2>
<p>Requested scopes: <code>{scopes}</code></p>
<p><a class="button" href="{authorize_url}" data-state="{state}" data-nonce="{nonce}">Log in to Tesla</a></p>
</div>
</body>
</html>"#,
        style = STYLE,
        domain = html_escape(page.domain),
        client_id = html_escape(page.client_id),
        banner = banner,
        public_key_url = html_escape(page.public_key_url),
        scopes = html_escape(page.scopes),
        authorize_url = html_escape(page.authorize_url.as_str()),
        state = html_escape(page.state),
        nonce = html_escape(page.nonce),
    )
}

/// Render the page shown after a successful code exchange.
#[must_use]
pub fn render_callback(summary: &SetupSummary) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Tesla Fleet API Setup</title>
<style>{style}</style>
</head>
<body>
<div class="card">
<h1>Authorization complete</h1>
<div class="success">The authorization code was exchanged for a refresh token.</div>
<p>Copy these values now. The refresh token is not stored and will not be shown again.</p>
<pre>{summary}</pre>
<p><a href="/">Back</a></p>
</div>
</body>
</html>"#,
        style = STYLE,
        summary = html_escape(&summary.to_string()),
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn url() -> Url {
        Url::parse_with_params(
            "https://auth.example.com/authorize",
            &[("client_id", "cid"), ("scope", "a b")],
        )
        .unwrap()
    }

    fn page<'a>(url: &'a Url, error: Option<&'a str>, success: bool) -> IndexPage<'a> {
        IndexPage {
            domain: "proxy.example.com",
            client_id: "cid",
            scopes: "a b",
            state: "s1",
            nonce: "n1",
            authorize_url: url,
            public_key_url: "https://proxy.example.com/key.pem",
            error,
            success,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<script>alert("xss")</script>"#),
            "&lt;script&gt;alert(&quot;xss&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_index_without_banner() {
        let url = url();
        let html = render_index(&page(&url, None, false));
        assert!(html.contains("proxy.example.com"));
        assert!(html.contains("cid"));
        assert!(html.contains("data-state=\"s1\""));
        assert!(html.contains("data-nonce=\"n1\""));
        assert!(html.contains("client_id=cid&amp;scope=a+b"));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("class=\"success\""));
    }

    #[test]
    fn test_render_index_error_banner_is_escaped() {
        let url = url();
        let html = render_index(&page(&url, Some("<b>401</b>"), false));
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("&lt;b&gt;401&lt;/b&gt;"));
        assert!(!html.contains("<b>401</b>"));
    }

    #[test]
    fn test_render_index_success_banner() {
        let url = url();
        let html = render_index(&page(&url, None, true));
        assert!(html.contains("Partner account registered."));
    }

    #[test]
    fn test_render_callback_shows_summary() {
        let summary = SetupSummary {
            refresh_token: "R<1>".to_string(),
            proxy_url: "https://proxy.example.com".to_string(),
            certificate_path: PathBuf::from("/data/tesla-proxy/cert.pem"),
            client_id: "cid".to_string(),
        };
        let html = render_callback(&summary);
        assert!(html.contains("Refresh token  : R&lt;1&gt;"));
        assert!(html.contains("/data/tesla-proxy/cert.pem"));
    }
}
