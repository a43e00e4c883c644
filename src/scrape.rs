//! The paginated category scraper: sequential drive loop, per-letter count
//! accumulation, and flat-file export.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use tracing::info;

use crate::{parse, request, Result, BASE_URL, RUSSIAN_LOWER, TIMEOUT_SECS};

/// Scraper configuration. All fields are fixed at construction.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// When set, only letter groups from `alphabet` are accumulated.
    pub russian_only: bool,
    /// Reference alphabet for `russian_only` filtering, lowercase.
    pub alphabet: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            russian_only: false,
            alphabet: RUSSIAN_LOWER.to_string(),
        }
    }
}

/// Walks a paginated category listing and accumulates per-letter entry
/// counts, in first-seen order, across all visited pages.
///
/// One instance owns one HTTP client and one accumulator; the accumulator
/// only grows, it is never reset between pages.
pub struct CategoryScraper {
    client: Client,
    config: ScraperConfig,
    pages_processed: usize,
    letters: Vec<(String, usize)>,
}

impl CategoryScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            pages_processed: 0,
            letters: Vec::new(),
        }
    }

    /// Letter → count pairs in first-seen order.
    pub fn letter_counts(&self) -> &[(String, usize)] {
        &self.letters
    }

    pub fn pages_processed(&self) -> usize {
        self.pages_processed
    }

    /// Sum of all accumulated counts.
    pub fn total_entries(&self) -> usize {
        self.letters.iter().map(|(_, count)| count).sum()
    }

    /// Extracts one page's letter groups and merges them into the
    /// accumulator, applying the Russian-only filter if configured.
    pub fn ingest_page(&mut self, doc: &Html) -> Result<()> {
        for (letter, count) in parse::letter_counts(doc)? {
            if self.config.russian_only
                && !self.config.alphabet.contains(letter.to_lowercase().as_str())
            {
                continue;
            }
            match self.letters.iter_mut().find(|(l, _)| *l == letter) {
                Some((_, total)) => *total += count,
                None => self.letters.push((letter, count)),
            }
        }
        Ok(())
    }

    /// Drives the whole run: fetch, ingest, follow the next-page link,
    /// until a page has no next link. Any fetch error aborts the run.
    pub async fn run(&mut self) -> Result<()> {
        let mut url = self.config.base_url.clone();
        loop {
            let html =
                request::fetch_page_html(&self.client, &url, self.config.timeout).await?;
            // The parsed document is not Send; keep it off the await points.
            let next = {
                let doc = Html::parse_document(&html);
                self.ingest_page(&doc)?;
                parse::next_page_url(&doc, &self.config.base_url)?
            };
            self.pages_processed += 1;

            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        info!(
            pages = self.pages_processed,
            total = self.total_entries(),
            "scrape finished"
        );
        Ok(())
    }

    /// Writes the accumulated counts as `letter,count` rows, one per letter
    /// in first-seen order, no header. Overwrites any existing file.
    pub async fn save_to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut out = String::new();
        for (letter, count) in &self.letters {
            out.push_str(letter);
            out.push(',');
            out.push_str(&count.to_string());
            out.push('\n');
        }
        tokio::fs::write(path.as_ref(), out.as_bytes()).await?;
        info!(path = %path.as_ref().display(), "saved letter counts");
        Ok(())
    }
}
