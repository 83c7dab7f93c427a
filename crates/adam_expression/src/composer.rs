//! Reply assembly: fragment joining and hyperlink splicing.

use adam_core::config::LinkConfig;

/// Separator placed between reply fragments.
pub const PARAGRAPH_BREAK: &str = "<br><br>";

/// Token replaced by the storefront anchor.
pub const STORE_TOKEN: &str = "{store}";
/// Token replaced by the announcement anchor.
pub const COMING_SOON_TOKEN: &str = "{coming_soon}";

/// Render an underlined anchor that opens in a new tab.
pub fn anchor(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener" style="text-decoration:underline;">{}</a>"#,
        url, label
    )
}

#[derive(Debug, Clone)]
pub struct ResponseComposer {
    store_link: String,
    coming_soon_link: String,
}

impl ResponseComposer {
    pub fn new(links: &LinkConfig) -> Self {
        Self {
            store_link: anchor(&links.store_url, "Store"),
            coming_soon_link: anchor(&links.coming_soon_url, "Coming Soon"),
        }
    }

    pub fn store_link(&self) -> &str {
        &self.store_link
    }

    pub fn coming_soon_link(&self) -> &str {
        &self.coming_soon_link
    }

    /// Replace link tokens in a single fragment.
    pub fn render(&self, fragment: &str) -> String {
        fragment
            .replace(STORE_TOKEN, &self.store_link)
            .replace(COMING_SOON_TOKEN, &self.coming_soon_link)
    }

    /// Join fragments in order, skipping empty ones, and splice in links.
    pub fn compose<S: AsRef<str>>(&self, fragments: &[S]) -> String {
        fragments
            .iter()
            .map(AsRef::as_ref)
            .filter(|f| !f.trim().is_empty())
            .map(|f| self.render(f))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK)
    }
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(&LinkConfig::default())
    }
}
