use std::fmt;

use smallvec::SmallVec;

use crate::pagination::Pagination;

/// Pages shown without collapsing into ellipses.
const FULL_WINDOW: u32 = 7;

/// A single entry in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// Link to a page.
    Page {
        /// Page number.
        number: u32,

        /// Whether it is the current page.
        current: bool,
    },

    /// Collapsed run of pages.
    Ellipsis,
}

/// Pagination control: previous/next state plus a windowed page list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    /// Current page.
    pub current: u32,

    /// Number of pages.
    pub total_pages: u32,

    /// Whether "previous" is disabled.
    pub previous_disabled: bool,

    /// Whether "next" is disabled.
    pub next_disabled: bool,

    /// Page links in display order.
    pub links: SmallVec<[PageLink; 9]>,
}

impl PaginationBar {
    /// Build a bar for `current` of `total_pages`.
    ///
    /// Always shows the first and last page and the neighbours of the
    /// current page; gaps collapse to an ellipsis.
    #[must_use]
    pub fn new(current: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        let current = current.clamp(1, total_pages);
        let page = |number| PageLink::Page {
            number,
            current: number == current,
        };

        let mut links: SmallVec<[PageLink; 9]> = SmallVec::new();

        if total_pages <= FULL_WINDOW {
            links.extend((1..=total_pages).map(page));
        } else {
            let start = current.saturating_sub(1).max(2);
            let end = (current + 1).min(total_pages - 1);

            links.push(page(1));

            if start > 2 {
                links.push(PageLink::Ellipsis);
            }

            links.extend((start..=end).map(page));

            if end < total_pages - 1 {
                links.push(PageLink::Ellipsis);
            }

            links.push(page(total_pages));
        }

        Self {
            current,
            total_pages,
            previous_disabled: current <= 1,
            next_disabled: current >= total_pages,
            links,
        }
    }

    /// Bar for an API pagination block.
    #[must_use]
    pub fn from_pagination(pagination: &Pagination) -> Self {
        Self::new(pagination.current_page, pagination.total_pages)
    }

    /// Page numbers shown, without ellipses.
    pub fn page_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.links.iter().filter_map(|link| match link {
            PageLink::Page { number, .. } => Some(*number),
            PageLink::Ellipsis => None,
        })
    }
}

impl fmt::Display for PaginationBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.previous_disabled { "  " } else { "‹ " })?;

        for (index, link) in self.links.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }

            match link {
                PageLink::Page {
                    number,
                    current: true,
                } => write!(f, "[{number}]")?,
                PageLink::Page { number, .. } => write!(f, "{number}")?,
                PageLink::Ellipsis => f.write_str("…")?,
            }
        }

        f.write_str(if self.next_disabled { "" } else { " ›" })
    }
}
