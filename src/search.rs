//! Web search launcher - site URL templates and the browser collaborator
//!
//! The engine only builds a URL and hands it off; nothing is fetched. The
//! site map is keyed by name so an unmapped site stays a soft miss.

use anyhow::{Context, Result};
use std::process::Command;

/// Build the search URL for a site key, or `None` for an unmapped site.
/// Query terms are percent-encoded.
pub fn site_url(site: &str, term: &str) -> Option<String> {
    let url = match site {
        "google" => format!("https://google.com/search?q={}", urlencoding::encode(term)),
        "youtube" => format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(term)
        ),
        "maps" => format!(
            "https://google.com/maps/place/{}",
            urlencoding::encode(term)
        ),
        "weather" => format!(
            "https://google.com/search?q={}",
            urlencoding::encode(&format!("{} weather", term))
        ),
        _ => return None,
    };
    Some(url)
}

/// Hands a fully formed URL to the default browser. The engine never
/// inspects a return value beyond success.
pub trait UrlOpener {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Opens URLs through the platform opener command.
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = {
            let mut c = Command::new("open");
            c.arg(url);
            c
        };
        #[cfg(target_os = "windows")]
        let mut command = {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", url]);
            c
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut command = {
            let mut c = Command::new("xdg-open");
            c.arg(url);
            c
        };

        command
            .spawn()
            .with_context(|| format!("Failed to open {}", url))?;
        Ok(())
    }
}
