// src/listing/scanner.rs
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info};

use super::{job_id_from_url, FreshnessWindows, JobCard};
use crate::core::cascade::{compile_selector, element_text, Cascade};
use crate::core::relative_time::parse_relative_minutes;
use crate::core::selectors::ListingSelectors;

pub struct ListingScanner {
    job_cards: Cascade,
    job_id_attribute: String,
    job_link: Option<Selector>,
    posting_time: Cascade,
    posting_time_fallback: Option<Selector>,
    title_link: Cascade,
    windows: FreshnessWindows,
}

impl Default for ListingScanner {
    fn default() -> Self {
        Self::new(&ListingSelectors::default(), FreshnessWindows::default())
    }
}

impl ListingScanner {
    pub fn new(selectors: &ListingSelectors, windows: FreshnessWindows) -> Self {
        Self {
            job_cards: Cascade::compile("job cards", &selectors.job_cards),
            job_id_attribute: selectors.job_id_attribute.clone(),
            job_link: compile_selector("job link", &selectors.job_link),
            posting_time: Cascade::compile("posting time", &selectors.posting_time),
            posting_time_fallback: compile_selector(
                "posting time fallback",
                &selectors.posting_time_fallback,
            ),
            title_link: Cascade::compile("title link", &selectors.title_link),
            windows,
        }
    }

    /// Job cards on a search-results page, one per job id, in page order.
    /// Cards without a recognisable id are skipped.
    pub fn scan(&self, document: &Html) -> Vec<JobCard> {
        let cards = self.job_cards.first_match_set(document.root_element());
        if cards.is_empty() {
            info!("No job cards found on page");
            return Vec::new();
        }
        info!("Found {} job cards", cards.len());

        let mut seen = HashSet::new();
        let mut jobs = Vec::new();
        for card in cards {
            let Some(job_id) = self.job_id(card) else {
                debug!("Skipping job card without an id");
                continue;
            };
            if !seen.insert(job_id.clone()) {
                continue;
            }
            jobs.push(self.read_card(card, job_id));
        }
        jobs
    }

    fn read_card(&self, card: ElementRef<'_>, job_id: String) -> JobCard {
        let posting_time = self.posting_time(card);
        let minutes_ago = posting_time.as_deref().and_then(parse_relative_minutes);
        let tier = posting_time
            .as_deref()
            .and_then(|time| self.windows.classify(time));
        let link = self.title_link.first_element(card);

        if let Some(tier) = tier {
            debug!(
                "Job {} posted {} falls in the {} window",
                job_id,
                posting_time.as_deref().unwrap_or_default(),
                tier.label()
            );
        }

        JobCard {
            title: link
                .map(|a| element_text(a).trim().to_string())
                .filter(|t| !t.is_empty()),
            url: link.and_then(|a| a.value().attr("href")).map(str::to_string),
            job_id,
            posting_time,
            minutes_ago,
            tier,
        }
    }

    fn job_id(&self, card: ElementRef<'_>) -> Option<String> {
        if let Some(id) = card
            .value()
            .attr(&self.job_id_attribute)
            .filter(|id| !id.is_empty())
        {
            return Some(id.to_string());
        }

        let link = card.select(self.job_link.as_ref()?).next()?;
        job_id_from_url(link.value().attr("href")?)
    }

    fn posting_time(&self, card: ElementRef<'_>) -> Option<String> {
        if let Some(time) = self.posting_time.first_text(card, |_| true) {
            return Some(time);
        }

        let fallback = self.posting_time_fallback.as_ref()?;
        card.select(fallback).find_map(|element| {
            let text = element_text(element).trim().to_string();
            let mentions_time = text.contains("minute") || text.contains("hour");
            (mentions_time && text.contains("ago")).then_some(text)
        })
    }
}
