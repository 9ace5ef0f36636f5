use crate::domain::entities::audit::Paged;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total: 0,
            total_pages: 0,
        }
    }
}

pub fn total_pages_for(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit)) as u32
}

impl PaginationState {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let mut state = Self {
            page,
            limit,
            total,
            total_pages: total_pages_for(total, limit),
        };
        state.page = state.clamp(page);
        state
    }

    /// Echo of the server's paging fields after a successful fetch.
    /// Missing `totalPages` is derived from the total and limit.
    pub fn from_server<T>(paged: &Paged<T>) -> Self {
        if paged.total_pages == 0 {
            return Self::new(paged.page, paged.limit, paged.total);
        }
        let mut state = Self {
            page: paged.page,
            limit: paged.limit,
            total: paged.total,
            total_pages: paged.total_pages,
        };
        state.page = state.clamp(paged.page);
        state
    }

    fn clamp(&self, page: u32) -> u32 {
        if self.total_pages == 0 {
            1
        } else {
            page.clamp(1, self.total_pages)
        }
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages
    }

    /// Page to request for "previous", `None` at the lower bound.
    pub fn prev(&self) -> Option<u32> {
        self.can_prev().then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.can_next().then(|| self.page + 1)
    }

    /// 1-based `(first, last)` row numbers shown on the current page.
    pub fn window(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let page = u64::from(self.page.max(1));
        let limit = u64::from(self.limit);
        let first = (page - 1) * limit + 1;
        let last = (page * limit).min(self.total);
        (first, last)
    }

    pub fn page_text(&self) -> String {
        format!("Página {} de {}", self.page, self.total_pages.max(1))
    }

    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn range_text(&self) -> String {
        let (first, last) = self.window();
        format!("Mostrando {first} a {last} de {} resultados", self.total)
    }
}
