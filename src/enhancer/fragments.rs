//! Shared header/footer fragment loading

use crate::config::{FragmentConfig, FragmentSlot};
use crate::network::ResourceLoader;
use crate::page::Page;
use crate::utils::Result;
use serde::Serialize;

/// Relative prefix of the fragment directory for a page path.
///
/// Depth counts the non-empty path segments other than `index.html`. A page
/// at depth 0 reaches the directory at the same level, any deeper page goes
/// one level up.
pub fn component_path(path: &str, dir: &str) -> String {
    let depth = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "index.html")
        .count();

    if depth == 0 {
        format!("./{}/", dir)
    } else {
        format!("../{}/", dir)
    }
}

/// What happened to one fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum FragmentOutcome {
    /// Markup spliced into the placeholder
    Injected { bytes: usize },
    /// Non-success response, nothing injected
    Skipped { status: u16 },
    /// Fetched, but the page has no placeholder for it
    MissingPlaceholder,
    /// Retrieval or parsing failed; the error was logged
    Failed,
    /// Not loaded yet, as when boot is still deferred
    NotAttempted,
}

/// Outcomes for both fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentReport {
    pub header: FragmentOutcome,
    pub footer: FragmentOutcome,
}

impl Default for FragmentReport {
    fn default() -> Self {
        Self {
            header: FragmentOutcome::NotAttempted,
            footer: FragmentOutcome::NotAttempted,
        }
    }
}

/// Fetches fragments and splices them into their placeholders
pub struct FragmentLoader<'a, L> {
    loader: &'a L,
    config: &'a FragmentConfig,
}

impl<'a, L: ResourceLoader> FragmentLoader<'a, L> {
    pub fn new(loader: &'a L, config: &'a FragmentConfig) -> Self {
        Self { loader, config }
    }

    /// Load the header, then the footer. Each fragment's failure is logged
    /// on its own and never reaches the caller or the other fragment.
    pub async fn load(&self, page: &mut Page) -> FragmentReport {
        let prefix = component_path(page.location().pathname(), &self.config.dir);
        FragmentReport {
            header: self.load_slot(page, &prefix, &self.config.header).await,
            footer: self.load_slot(page, &prefix, &self.config.footer).await,
        }
    }

    async fn load_slot(&self, page: &mut Page, prefix: &str, slot: &FragmentSlot) -> FragmentOutcome {
        match self.load_one(page, prefix, slot).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Error loading components: {}", e);
                FragmentOutcome::Failed
            }
        }
    }

    async fn load_one(&self, page: &mut Page, prefix: &str, slot: &FragmentSlot) -> Result<FragmentOutcome> {
        let url = page.location().resolve(&format!("{}{}", prefix, slot.file))?;
        let response = self.loader.fetch(&url).await?;
        if !response.is_success() {
            log::trace!("skipping {}: status {}", url, response.status());
            return Ok(FragmentOutcome::Skipped {
                status: response.status(),
            });
        }

        let Some(placeholder) = page.document().get_element_by_id(&slot.placeholder) else {
            log::debug!("no #{} placeholder for {}", slot.placeholder, url);
            return Ok(FragmentOutcome::MissingPlaceholder);
        };
        page.document_mut().set_inner_html(placeholder, response.body())?;
        Ok(FragmentOutcome::Injected {
            bytes: response.body().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_paths_use_same_level() {
        assert_eq!(component_path("/", "components"), "./components/");
        assert_eq!(component_path("", "components"), "./components/");
        assert_eq!(component_path("/index.html", "components"), "./components/");
        assert_eq!(component_path("//index.html/", "components"), "./components/");
    }

    #[test]
    fn test_nested_paths_go_up_one_level() {
        assert_eq!(component_path("/about.html", "components"), "../components/");
        assert_eq!(component_path("/pages/index.html", "components"), "../components/");
        assert_eq!(component_path("/a/b/c.html", "partials"), "../partials/");
    }
}
