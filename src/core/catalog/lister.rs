//! The lister abstraction over a remote paginated catalog.

use super::{CatalogPage, FileRecord, PageToken};
use crate::error::ListError;

/// A paginated view of a remote file catalog.
///
/// Implementations wrap one remote listing API. The contract:
/// - `fetch_page(None)` returns the first page; `fetch_page(Some(token))`
///   returns the page the token points at.
/// - A page with `next_token == None` is the last one.
/// - Remote implementations must request only the fields deduplication
///   needs (id, title, checksum, size, next token) to keep per-call
///   payloads small. This is part of the contract, not an optimization.
/// - Errors propagate unmodified. No retry happens in this layer; retries,
///   if desired, belong to the transport collaborator behind it.
/// - Pull-based: the caller controls pacing and may sleep between pages to
///   respect remote rate limits. The lister holds no timer.
pub trait CatalogLister {
    fn fetch_page(&mut self, token: Option<&PageToken>) -> Result<CatalogPage, ListError>;
}

enum Cursor {
    Start(Option<PageToken>),
    Next(PageToken),
    Done,
}

/// Lazy, finite iterator over the pages of a [`CatalogLister`].
///
/// Yields `Result<CatalogPage, ListError>`; the first error is also the
/// last item. Construct with [`Pages::new`] for a full traversal or
/// [`Pages::resume`] to restart from a previously saved token.
pub struct Pages<'a, L: CatalogLister + ?Sized> {
    lister: &'a mut L,
    cursor: Cursor,
}

impl<'a, L: CatalogLister + ?Sized> Pages<'a, L> {
    /// Iterate the catalog from its first page.
    pub fn new(lister: &'a mut L) -> Self {
        Self {
            lister,
            cursor: Cursor::Start(None),
        }
    }

    /// Iterate the catalog from a checkpoint token.
    ///
    /// `None` behaves like [`Pages::new`]. Tokens are opaque and stable, so
    /// a caller that persisted one may hand it back here after a restart.
    pub fn resume(lister: &'a mut L, token: Option<PageToken>) -> Self {
        Self {
            lister,
            cursor: Cursor::Start(token),
        }
    }
}

impl<L: CatalogLister + ?Sized> Iterator for Pages<'_, L> {
    type Item = Result<CatalogPage, ListError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = match &self.cursor {
            Cursor::Start(token) => token.clone(),
            Cursor::Next(token) => Some(token.clone()),
            Cursor::Done => return None,
        };

        match self.lister.fetch_page(token.as_ref()) {
            Ok(page) => {
                self.cursor = match &page.next_token {
                    Some(next) => Cursor::Next(next.clone()),
                    None => Cursor::Done,
                };
                Some(Ok(page))
            }
            Err(e) => {
                self.cursor = Cursor::Done;
                Some(Err(e))
            }
        }
    }
}

/// An in-memory lister over canned pages.
///
/// Used by tests and the snapshot-driven CLI path. Tokens are page indices
/// rendered as strings, which also makes checkpoint/resume behavior easy to
/// exercise.
pub struct StaticCatalog {
    pages: Vec<Vec<FileRecord>>,
    fail_at_page: Option<usize>,
}

impl StaticCatalog {
    /// A catalog serving the given pages in order.
    ///
    /// Zero pages normalizes to one empty final page, so an empty catalog
    /// lists cleanly instead of rejecting the initial fetch.
    pub fn new(pages: Vec<Vec<FileRecord>>) -> Self {
        let pages = if pages.is_empty() {
            vec![Vec::new()]
        } else {
            pages
        };
        Self {
            pages,
            fail_at_page: None,
        }
    }

    /// A single-page catalog.
    pub fn single_page(records: Vec<FileRecord>) -> Self {
        Self::new(vec![records])
    }

    /// A catalog that returns a transport error when the page at
    /// `page_index` is requested. Lets tests exercise mid-scan aborts.
    pub fn failing_at(pages: Vec<Vec<FileRecord>>, page_index: usize) -> Self {
        Self {
            pages,
            fail_at_page: Some(page_index),
        }
    }

    fn parse_token(token: &PageToken) -> Result<usize, ListError> {
        token.as_str().parse().map_err(|_| ListError::BadToken {
            token: token.as_str().to_string(),
        })
    }
}

impl CatalogLister for StaticCatalog {
    fn fetch_page(&mut self, token: Option<&PageToken>) -> Result<CatalogPage, ListError> {
        let index = match token {
            None => 0,
            Some(token) => Self::parse_token(token)?,
        };

        if self.fail_at_page == Some(index) {
            return Err(ListError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                format!("simulated transport failure at page {index}"),
            )));
        }

        let records = match self.pages.get(index) {
            Some(records) => records.clone(),
            None => {
                return Err(ListError::BadToken {
                    token: token.map(|t| t.as_str().to_string()).unwrap_or_default(),
                })
            }
        };

        let next_token = if index + 1 < self.pages.len() {
            Some(PageToken::new((index + 1).to_string()))
        } else {
            None
        };

        Ok(CatalogPage {
            records,
            next_token,
        })
    }
}
