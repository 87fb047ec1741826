use serde::{Deserialize, Serialize};

/// Page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request; zero values fall back to page 1 / size 1.
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.max(1),
        }
    }
}

/// Pagination totals advertised through `x-*` response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderTotals {
    pub total_count: Option<u64>,
    pub total_pages: Option<u32>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Aggregates embedded in the first row of a payload.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PayloadTotals {
    pub total_registros: Option<u64>,
    pub soma_valor_pago: Option<f64>,
}

/// Normalised page metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total_count: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
    /// Sum of `valorPago` over every matching row, when the service sends it.
    pub sum_paid: Option<f64>,
}

impl PageMeta {
    /// Merge header and payload sources for the page fetched with `request`.
    ///
    /// Payload aggregates win over headers. When the payload total is used
    /// the page count is recomputed from it. Missing header values fall
    /// back to an empty result on the requested page.
    pub fn resolve(request: PageRequest, headers: HeaderTotals, payload: PayloadTotals) -> Self {
        let page_size = headers.page_size.filter(|s| *s > 0).unwrap_or(request.page_size);
        let current_page = headers
            .current_page
            .filter(|p| *p > 0)
            .unwrap_or(request.page_number);

        let (total_count, total_pages) = payload.total_registros.map_or_else(
            || {
                (
                    headers.total_count.unwrap_or(0),
                    headers.total_pages.filter(|p| *p > 0).unwrap_or(1),
                )
            },
            |total| (total, pages_for(total, page_size)),
        );

        Self {
            total_count,
            total_pages,
            current_page,
            page_size,
            sum_paid: payload.soma_valor_pago,
        }
    }

    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

fn pages_for(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One page of records with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
