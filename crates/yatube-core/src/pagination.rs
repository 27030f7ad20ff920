//! Page-number pagination for post listings.

use serde::Serialize;

/// Default number of posts per listing page.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Page number that `clamp` turns into the last page.
const LAST_PAGE: u64 = u64::MAX;

/// Whether `s` spells an integer, however large.
fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// A requested page. Numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(number: u64, per_page: u64) -> Self {
        Self {
            number: number.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Parse a raw `page` query value. Missing or non-numeric values select
    /// the first page. Numbers out of range, zero and negatives included,
    /// select the last page once clamped.
    pub fn parse(raw: Option<&str>, per_page: u64) -> Self {
        let number = match raw.map(str::trim) {
            None => 1,
            Some(s) => match s.parse::<i64>() {
                Ok(n) if n >= 1 => n as u64,
                Ok(_) => LAST_PAGE,
                Err(_) if is_integer(s) => LAST_PAGE,
                Err(_) => 1,
            },
        };
        Self::new(number, per_page)
    }

    /// Number of pages needed for `total` items. An empty listing still has
    /// one (empty) page.
    pub fn num_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page).max(1)
    }

    /// Clamp the requested number to the last available page.
    pub fn clamp(self, total: u64) -> Self {
        Self {
            number: self.number.min(self.num_pages(total)),
            per_page: self.per_page,
        }
    }

    /// Zero-based index of the page, as storage backends count them.
    pub fn index(&self) -> u64 {
        self.number - 1
    }

    pub fn offset(&self) -> u64 {
        self.index() * self.per_page
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            number: request.number,
            per_page: request.per_page,
            total,
        }
    }

    /// Slice an in-memory, already ordered collection.
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let request = request.clamp(total);
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.per_page as usize)
            .collect();
        Self::new(items, request, total)
    }

    pub fn num_pages(&self) -> u64 {
        PageRequest::new(self.number, self.per_page).num_pages(self.total)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            total: self.total,
        }
    }
}
