//! The output document model.
//!
//! [`OutputDocument`] owns every page and binary asset produced by one run.
//! Page order is the reading order (spine); the navigation structures in
//! [`epub`] mirror it. Resource ids and hrefs are unique across the whole
//! document, enforced at registration time.

pub mod epub;

use std::collections::HashSet;

use crate::app::{BinderyError, Result};

/// A binary resource bundled into the archive.
#[derive(Debug, Clone)]
pub struct PackagedAsset {
    pub id: String,
    /// Path inside the archive, relative to the content root.
    pub href: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// One XHTML page in the reading order.
#[derive(Debug, Clone)]
pub struct DocumentPage {
    pub id: String,
    pub title: String,
    pub href: String,
    /// Complete serialized XHTML.
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct BookMeta {
    pub title: String,
    pub identifier: String,
    pub language: String,
    pub author: String,
    /// Creation date, `YYYY-MM-DD`.
    pub date: String,
}

/// Registration seam for modules that produce assets while transforming
/// content, without handing them the whole document.
pub trait AssetSink {
    fn register(&mut self, asset: PackagedAsset) -> Result<()>;
}

#[derive(Debug)]
pub struct OutputDocument {
    pub meta: BookMeta,
    pages: Vec<DocumentPage>,
    assets: Vec<PackagedAsset>,
    ids: HashSet<String>,
    hrefs: HashSet<String>,
}

impl OutputDocument {
    pub fn new(meta: BookMeta) -> Self {
        Self {
            meta,
            pages: Vec::new(),
            assets: Vec::new(),
            ids: HashSet::new(),
            hrefs: HashSet::new(),
        }
    }

    /// Append a page to the reading order.
    pub fn add_page(&mut self, page: DocumentPage) -> Result<()> {
        self.claim(&page.id, &page.href)?;
        self.pages.push(page);
        Ok(())
    }

    /// Insert a page at a position in the reading order. Used for the table
    /// of contents, whose content is only complete after all feeds have
    /// been traversed but which reads second, right after the cover.
    pub fn insert_page(&mut self, index: usize, page: DocumentPage) -> Result<()> {
        self.claim(&page.id, &page.href)?;
        self.pages.insert(index, page);
        Ok(())
    }

    pub fn add_asset(&mut self, asset: PackagedAsset) -> Result<()> {
        self.claim(&asset.id, &asset.href)?;
        self.assets.push(asset);
        Ok(())
    }

    /// Pages in reading order.
    pub fn pages(&self) -> &[DocumentPage] {
        &self.pages
    }

    pub fn assets(&self) -> &[PackagedAsset] {
        &self.assets
    }

    fn claim(&mut self, id: &str, href: &str) -> Result<()> {
        if self.ids.contains(id) || self.hrefs.contains(href) {
            return Err(BinderyError::DuplicateResource(format!("{id} ({href})")));
        }
        self.ids.insert(id.to_string());
        self.hrefs.insert(href.to_string());
        Ok(())
    }
}

impl AssetSink for OutputDocument {
    fn register(&mut self, asset: PackagedAsset) -> Result<()> {
        self.add_asset(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> BookMeta {
        BookMeta {
            title: "RSS Feeds 2024-01-01".into(),
            identifier: "test-id".into(),
            language: "zh-CN".into(),
            author: "bindery".into(),
            date: "2024-01-01".into(),
        }
    }

    fn page(id: &str, href: &str) -> DocumentPage {
        DocumentPage {
            id: id.into(),
            title: id.into(),
            href: href.into(),
            content: "<html/>".into(),
        }
    }

    #[test]
    fn test_pages_keep_insertion_order() {
        let mut doc = OutputDocument::new(meta());
        doc.add_page(page("cover", "cover.xhtml")).unwrap();
        doc.add_page(page("chapter_1", "chapter_1.xhtml")).unwrap();
        doc.insert_page(1, page("toc", "toc.xhtml")).unwrap();

        let ids: Vec<&str> = doc.pages().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["cover", "toc", "chapter_1"]);
    }

    #[test]
    fn test_duplicate_page_id_rejected() {
        let mut doc = OutputDocument::new(meta());
        doc.add_page(page("cover", "cover.xhtml")).unwrap();
        let result = doc.add_page(page("cover", "other.xhtml"));
        assert!(matches!(result, Err(BinderyError::DuplicateResource(_))));
    }

    #[test]
    fn test_duplicate_href_rejected_across_kinds() {
        let mut doc = OutputDocument::new(meta());
        doc.add_asset(PackagedAsset {
            id: "image_0_0_0".into(),
            href: "images/a.png".into(),
            media_type: "image/png".into(),
            data: vec![1, 2, 3],
        })
        .unwrap();
        let result = doc.add_asset(PackagedAsset {
            id: "image_0_0_1".into(),
            href: "images/a.png".into(),
            media_type: "image/png".into(),
            data: vec![4],
        });
        assert!(matches!(result, Err(BinderyError::DuplicateResource(_))));
    }
}
