//! Share links and clipboard access.
//!
//! A share link is `<origin>?plan=<code>`. The code only means something to
//! an instance that already holds a plan carrying it.

use crate::{Error, Result};

/// Query parameter carrying the share code.
pub const SHARE_PARAM: &str = "plan";

/// Origin used for share links when none is configured.
pub const DEFAULT_SHARE_ORIGIN: &str = "https://pupcrawl.app";

/// Build the share link for `code`.
pub fn share_url(origin: &str, code: &str) -> String {
    let origin = origin.trim().trim_end_matches('?');
    let origin = if origin.is_empty() {
        DEFAULT_SHARE_ORIGIN
    } else {
        origin
    };
    let separator = if origin.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        origin,
        separator,
        SHARE_PARAM,
        urlencoding::encode(code)
    )
}

/// Extract a share code from a share link, a bare query string, or a bare code.
///
/// Returns `None` for blank input or a link without a `plan` parameter.
pub fn share_code_from_input(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None if input.contains('=') => input,
        None if input.contains('/') => return None,
        None => return Some(input.to_string()),
    };
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == SHARE_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
}

/// Destination for copied share links.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Clipboard that is never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy(&mut self, _text: &str) -> Result<()> {
        Err(Error::Other("No clipboard available".to_string()))
    }
}

/// Helper program and its arguments; the text is written to its stdin.
#[cfg(not(target_arch = "wasm32"))]
pub type ClipboardHelper = (&'static str, &'static [&'static str]);

/// The desktop clipboard, reached through the first helper program that
/// accepts the text.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboard {
    helpers: &'static [ClipboardHelper],
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClipboard {
    const HELPERS: &'static [ClipboardHelper] = &[
        ("pbcopy", &[]),
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ];

    /// Tries `helpers` in order instead of the platform clipboard tools.
    pub fn with_helpers(helpers: &'static [ClipboardHelper]) -> Self {
        Self { helpers }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClipboard {
    fn default() -> Self {
        Self::with_helpers(Self::HELPERS)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        use std::io::Write;
        use std::process::{Command, Stdio};

        for (program, args) in self.helpers {
            let mut child = match Command::new(program)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => child,
                Err(_) => continue,
            };

            // stdin is dropped before wait so the helper sees EOF
            let written = match child.stdin.take() {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            };
            let status = child.wait()?;
            if let Err(err) = written {
                tracing::debug!(program, %err, "clipboard helper closed its input");
                continue;
            }
            if status.success() {
                tracing::debug!(program, "copied to clipboard");
                return Ok(());
            }
            tracing::debug!(program, %status, "clipboard helper failed");
        }

        Err(Error::Other("No clipboard helper found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("https://pupcrawl.app", "AbC123xyZ0"),
            "https://pupcrawl.app?plan=AbC123xyZ0"
        );
        assert_eq!(
            share_url("http://localhost:3000/?", "abc"),
            "http://localhost:3000/?plan=abc"
        );
        assert_eq!(
            share_url("https://example.com/map?lang=en", "abc"),
            "https://example.com/map?lang=en&plan=abc"
        );
        assert_eq!(share_url("  ", "abc"), "https://pupcrawl.app?plan=abc");
    }

    #[test]
    fn test_code_from_url() {
        assert_eq!(
            share_code_from_input("https://pupcrawl.app?plan=AbC123xyZ0").as_deref(),
            Some("AbC123xyZ0")
        );
        assert_eq!(
            share_code_from_input("https://pupcrawl.app/?lang=en&plan=abc#map").as_deref(),
            Some("abc")
        );
        assert_eq!(share_code_from_input("plan=abc").as_deref(), Some("abc"));
    }

    #[test]
    fn test_code_from_bare_input() {
        assert_eq!(share_code_from_input("  abc  ").as_deref(), Some("abc"));
    }

    #[test]
    fn test_code_missing() {
        assert_eq!(share_code_from_input(""), None);
        assert_eq!(share_code_from_input("https://pupcrawl.app?lang=en"), None);
        assert_eq!(share_code_from_input("https://pupcrawl.app/"), None);
        assert_eq!(share_code_from_input("https://pupcrawl.app?plan="), None);
    }

    #[test]
    fn test_url_round_trip() {
        let url = share_url(DEFAULT_SHARE_ORIGIN, "Zz09aaBBcc");
        assert_eq!(share_code_from_input(&url).as_deref(), Some("Zz09aaBBcc"));
    }

    #[test]
    fn test_no_clipboard_fails() {
        assert!(NoClipboard.copy("text").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_clipboard_falls_through_when_helper_closes_input() {
        // `true` exits without reading, so a large write hits a broken pipe
        static HELPERS: &[ClipboardHelper] = &[("true", &[]), ("cat", &[])];
        let mut clipboard = SystemClipboard::with_helpers(HELPERS);
        let text = "x".repeat(4 * 1024 * 1024);
        assert!(clipboard.copy(&text).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_clipboard_skips_missing_helper() {
        static HELPERS: &[ClipboardHelper] = &[("pupcrawl-no-such-helper", &[]), ("cat", &[])];
        let mut clipboard = SystemClipboard::with_helpers(HELPERS);
        assert!(clipboard.copy("https://pupcrawl.app?plan=abc").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_clipboard_all_helpers_fail() {
        static HELPERS: &[ClipboardHelper] = &[("false", &[]), ("pupcrawl-no-such-helper", &[])];
        let mut clipboard = SystemClipboard::with_helpers(HELPERS);
        assert!(matches!(
            clipboard.copy("https://pupcrawl.app?plan=abc"),
            Err(Error::Other(_))
        ));
    }
}
