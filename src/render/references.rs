//! Bibliography resolution.
//!
//! References come from three places: `{{refs>...}}` page nodes, manual
//! citation nodes `[(name>text)]`, and `[(P<digits>)]` PubMed tokens found
//! in the rendered outputs. They are rendered once, after traversal, as a
//! refnotes/pmid plugin block.

use std::collections::HashSet;

use regex::Regex;

const REFNOTES_PREAMBLE: &str = "\
<refnotes>
  refnote-id       : 1
  reference-base   : text
  reference-font-weight : normal
  reference-font-style : normal
  reference-format : []
  reference-group  : ,
  reference-render : basic
  multi-ref-id : note
  note-preview : popup
  notes-separator : none
  note-text-align : left
  note-font-size : normal
  note-render : basic
  note-id-base : text
  note-id-font-weight : normal
  note-id-font-style : normal
  note-id-format : .
  back-ref-caret : none
  back-ref-base : text
  back-ref-font-weight : bold
  back-ref-font-style : normal
  back-ref-format : none
  back-ref-separator : ,
  scoping : single
</refnotes>
";

const PAGE_LINK_SUFFIX: &str = "&nofooter&link";

/// References recorded during traversal.
#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    pages: Vec<String>,
    manual: Vec<String>,
    format: String,
}

impl Default for ReferenceRegistry {
    fn default() -> Self {
        Self::new("long")
    }
}

impl ReferenceRegistry {
    /// Create an empty registry with the given bibliography format.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            pages: Vec::new(),
            manual: Vec::new(),
            format: format.into(),
        }
    }

    /// Record a `{{refs>...}}` page.
    pub fn add_page(&mut self, raw: &str) {
        self.pages.push(raw.trim().to_string());
    }

    /// Record a manual citation line.
    pub fn add_manual(&mut self, raw: &str) {
        self.manual.push(raw.trim().to_string());
    }

    /// Replace the bibliography format.
    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn manual_references(&self) -> &[String] {
        &self.manual
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.manual.is_empty()
    }
}

/// A rendered bibliography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bibliography {
    /// Bibliography block (preamble, pages, PMIDs, manual references)
    pub text: String,
    /// Sorted distinct PMIDs
    pub pmids: Vec<String>,
    /// Number of page inclusions
    pub pages: usize,
    /// Number of manual references
    pub manual: usize,
}

/// Citation token scanner.
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    pmid: Regex,
    citation: Regex,
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceResolver {
    pub fn new() -> Self {
        Self {
            pmid: Regex::new(r"\[\(P(\d+)\)\]").unwrap(),
            citation: Regex::new(r"\[\([^)^>]*\)\]").unwrap(),
        }
    }

    /// Distinct PMIDs cited in `texts`, in ascending numeric order.
    pub fn collect_pmids(&self, texts: &[&str]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut pmids = Vec::new();
        for text in texts {
            for caps in self.pmid.captures_iter(text) {
                let id = caps[1].to_string();
                if seen.insert(id.clone()) {
                    pmids.push(id);
                }
            }
        }
        pmids.sort_by(|a, b| numeric_key(a).cmp(&numeric_key(b)).then_with(|| a.cmp(b)));
        pmids
    }

    /// Number of distinct citation tokens `[(...)]` in `text`.
    pub fn count_citations(&self, text: &str) -> usize {
        self.citation
            .find_iter(text)
            .map(|m| m.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Build the bibliography, or `None` when there is nothing to cite.
    pub fn bibliography(
        &self,
        registry: &ReferenceRegistry,
        texts: &[&str],
    ) -> Option<Bibliography> {
        let pmids = self.collect_pmids(texts);
        if pmids.is_empty() && registry.is_empty() {
            return None;
        }

        let mut text = String::from(REFNOTES_PREAMBLE);
        text.push('\n');
        text.push_str(&format!("{{{{pmid>doc_format:{}}}}}\n\n", registry.format()));

        if !registry.pages().is_empty() {
            for page in registry.pages() {
                text.push_str(&page_link(page));
                text.push('\n');
            }
            text.push('\n');
        }

        if !pmids.is_empty() {
            for id in &pmids {
                text.push_str(&format!("[(P{id}>{{{{pmid>{id}}}}})]\n"));
            }
            text.push('\n');
        }

        for manual in registry.manual_references() {
            text.push_str(manual);
            text.push('\n');
        }

        Some(Bibliography {
            text,
            pages: registry.pages().len(),
            manual: registry.manual_references().len(),
            pmids,
        })
    }
}

/// Leading zeros dropped, so `(len, digits)` orders numerically.
fn numeric_key(id: &str) -> (usize, &str) {
    let digits = id.trim_start_matches('0');
    (digits.len(), digits)
}

/// Turn `{{refs>ns:page}}` into `{{page>ns:page&nofooter&link}}`.
pub fn page_link(raw: &str) -> String {
    let mut page = raw.to_string();
    if !page.contains(PAGE_LINK_SUFFIX) {
        if let Some(pos) = page.rfind("}}") {
            page.insert_str(pos, PAGE_LINK_SUFFIX);
        }
    }
    match page.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("{{refs>") => {
            format!("{{{{page>{}", &page[7..])
        }
        _ => page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_pmids_dedup_and_sort() {
        let resolver = ReferenceResolver::new();
        let pmids = resolver.collect_pmids(&["See [(P456)] and [(P123)]", "Also [(P123)] [(P99)]"]);
        assert_eq!(pmids, vec!["99", "123", "456"]);
    }

    #[test]
    fn test_collect_pmids_idempotent() {
        let resolver = ReferenceResolver::new();
        let text = "[(P2)] [(P10)] [(P2)] [(P1)]";
        let first = resolver.collect_pmids(&[text]);
        let second = resolver.collect_pmids(&[text, text]);
        assert_eq!(first, second);
        assert_eq!(first, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_large_pmids_sort_numerically() {
        let resolver = ReferenceResolver::new();
        let pmids = resolver.collect_pmids(&["[(P123456789012345678901)] [(P9)]"]);
        assert_eq!(pmids, vec!["9", "123456789012345678901"]);
    }

    #[test]
    fn test_count_citations_distinct() {
        let resolver = ReferenceResolver::new();
        assert_eq!(resolver.count_citations("[(P1)] [(smith)] [(P1)] [(a>b)]"), 2);
        assert_eq!(resolver.count_citations("nothing here"), 0);
    }

    #[test]
    fn test_no_bibliography_without_citations() {
        let resolver = ReferenceResolver::new();
        let registry = ReferenceRegistry::default();
        assert!(resolver.bibliography(&registry, &["plain text"]).is_none());
    }

    #[test]
    fn test_bibliography_layout() {
        let resolver = ReferenceResolver::new();
        let mut registry = ReferenceRegistry::default();
        registry.add_page("{{refs>biblio:cardio}}");
        registry.add_manual("[(smith>Smith J. Title. 2020)]");
        registry.set_format("short");

        let bib = resolver
            .bibliography(&registry, &["[(P42)]"])
            .unwrap();
        assert!(bib.text.starts_with("<refnotes>\n"));
        assert!(bib.text.contains("{{pmid>doc_format:short}}\n"));
        assert!(bib.text.contains("{{page>biblio:cardio&nofooter&link}}\n"));
        assert!(bib.text.contains("[(P42>{{pmid>42}})]\n"));
        assert!(bib.text.ends_with("[(smith>Smith J. Title. 2020)]\n"));
        assert_eq!(bib.pmids, vec!["42"]);
        assert_eq!(bib.pages, 1);
        assert_eq!(bib.manual, 1);
    }

    #[test]
    fn test_page_link() {
        assert_eq!(page_link("{{refs>a:b}}"), "{{page>a:b&nofooter&link}}");
        assert_eq!(
            page_link("{{refs>a:b&nofooter&link}}"),
            "{{page>a:b&nofooter&link}}"
        );
    }
}
