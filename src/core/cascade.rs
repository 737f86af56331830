// src/core/cascade.rs
//! Ordered selector fallbacks evaluated against a document or element

use scraper::{ElementRef, Selector};
use tracing::{debug, warn};

/// Concatenated text content of an element and its descendants
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Compile one selector, logging and dropping it when it does not parse
pub fn compile_selector(field: &str, source: &str) -> Option<Selector> {
    match Selector::parse(source) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Dropping invalid {} selector '{}': {}", field, source, e);
            None
        }
    }
}

/// An ordered list of compiled selectors for one logical field
#[derive(Debug, Clone)]
pub struct Cascade {
    field: &'static str,
    selectors: Vec<(String, Selector)>,
}

impl Cascade {
    pub fn compile(field: &'static str, sources: &[String]) -> Self {
        let selectors = sources
            .iter()
            .filter_map(|source| {
                compile_selector(field, source).map(|selector| (source.clone(), selector))
            })
            .collect();
        let cascade = Self { field, selectors };
        if cascade.is_empty() && !sources.is_empty() {
            warn!("No usable {} selectors, the field will stay empty", field);
        }
        cascade
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Try each selector in order against its first matching element.
    ///
    /// `map` sees the trimmed, non-empty text; the first `Some` wins and the
    /// remaining selectors are not evaluated.
    pub fn find_map<F>(&self, root: ElementRef<'_>, map: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (source, selector) in &self.selectors {
            let Some(element) = root.select(selector).next() else {
                continue;
            };
            let text = element_text(element);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(value) = map(trimmed) {
                debug!("Found {} using selector: {}", self.field, source);
                return Some(value);
            }
        }
        None
    }

    /// First trimmed text accepted by `accept`
    pub fn first_text<F>(&self, root: ElementRef<'_>, accept: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        self.find_map(root, |text| accept(text).then(|| text.to_string()))
    }

    /// First element matched by any selector, in cascade order
    pub fn first_element<'a>(&self, root: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors
            .iter()
            .find_map(|(_, selector)| root.select(selector).next())
    }

    /// All matches of the first selector that matches anything
    pub fn first_match_set<'a>(&self, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        for (source, selector) in &self.selectors {
            let elements: Vec<ElementRef<'a>> = root.select(selector).collect();
            if !elements.is_empty() {
                debug!("Found {} {} using selector: {}", elements.len(), self.field, source);
                return elements;
            }
        }
        Vec::new()
    }

    /// Trimmed text of every element matched by every selector, cascade order
    /// then document order
    pub fn all_texts(&self, root: ElementRef<'_>) -> Vec<String> {
        self.selectors
            .iter()
            .flat_map(|(_, selector)| root.select(selector))
            .map(|element| element_text(element).trim().to_string())
            .collect()
    }
}
