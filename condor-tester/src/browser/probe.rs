use anyhow::{Context, Result, bail};
use std::time::Duration;
use thirtyfour::prelude::*;

/// DOM-level helpers over a live session. The front-end exposes no test hooks, so
/// everything goes through selectors a user could see.
#[derive(Debug, Clone)]
pub struct PageProbe<'a> {
    driver: &'a WebDriver,
}

impl<'a> PageProbe<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn open(&self, base_url: &str, path: &str) -> Result<()> {
        let url = page_url(base_url, path);
        self.driver
            .goto(&url)
            .await
            .with_context(|| format!("opening {url}"))?;
        self.driver
            .find(By::Css("#app"))
            .await
            .context("application root never mounted")?;
        Ok(())
    }

    pub async fn find(&self, css: &str) -> Result<WebElement> {
        self.driver
            .find(By::Css(css))
            .await
            .with_context(|| format!("missing element `{css}`"))
    }

    pub async fn assert_absent(&self, css: &str) -> Result<()> {
        let found = self.driver.find_all(By::Css(css)).await?;
        if !found.is_empty() {
            bail!("unexpected element `{css}` ({} matches)", found.len());
        }
        Ok(())
    }

    pub async fn text(&self, css: &str) -> Result<String> {
        Ok(self.find(css).await?.text().await?)
    }

    pub async fn type_into(&self, css: &str, value: &str) -> Result<()> {
        let field = self.find(css).await?;
        field.send_keys(value).await?;
        Ok(())
    }

    /// Give the UI a moment to re-render after input.
    pub async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}

pub fn page_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_joins_without_double_slashes() {
        assert_eq!(
            page_url("http://localhost:5173/", "/contacto"),
            "http://localhost:5173/contacto"
        );
        assert_eq!(page_url("http://localhost:5173", ""), "http://localhost:5173/");
    }
}
