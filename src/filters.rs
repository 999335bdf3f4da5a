//! Shop Filters

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while changing shop filters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Sort token is not `field_direction` with a known field and direction.
    #[error("unknown sort option `{0}`")]
    UnknownSort(String),

    /// Minimum price is above the maximum.
    #[error("minimum price {min} is above maximum price {max}")]
    InvalidPriceRange {
        /// Lower bound.
        min: Decimal,

        /// Upper bound.
        max: Decimal,
    },

    /// Negative price bound.
    #[error("price bounds cannot be negative")]
    NegativePrice,

    /// Pages start at 1.
    #[error("page numbers start at 1")]
    InvalidPage,
}

/// Field products can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Shelf price.
    Price,

    /// Product name.
    Name,

    /// Creation date.
    CreatedAt,
}

impl SortField {
    /// API field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Name => "name",
            SortField::CreatedAt => "createdAt",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,

    /// Descending.
    Desc,
}

impl SortOrder {
    /// API direction name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// A sort option, written as a `field_direction` token such as `price_asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    /// Field to sort by.
    pub field: SortField,

    /// Direction.
    pub order: SortOrder,
}

impl SortOption {
    /// Newest first.
    pub const NEWEST: Self = Self {
        field: SortField::CreatedAt,
        order: SortOrder::Desc,
    };

    /// Split into the `(sortBy, sortOrder)` pair sent to the API.
    #[must_use]
    pub fn decompose(self) -> (&'static str, &'static str) {
        (self.field.as_str(), self.order.as_str())
    }
}

impl Default for SortOption {
    fn default() -> Self {
        Self::NEWEST
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.field.as_str(), self.order.as_str())
    }
}

impl FromStr for SortOption {
    type Err = FilterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unknown = || FilterError::UnknownSort(token.to_string());
        let (field, order) = token.rsplit_once('_').ok_or_else(unknown)?;

        let field = match field {
            "price" => SortField::Price,
            "name" => SortField::Name,
            "createdAt" => SortField::CreatedAt,
            _ => return Err(unknown()),
        };

        let order = match order {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(unknown()),
        };

        Ok(Self { field, order })
    }
}

/// A single change to the shop filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// New search term.
    Search(String),

    /// New price range; `None` leaves a side open.
    PriceRange {
        /// Lower bound.
        min: Option<Decimal>,

        /// Upper bound.
        max: Option<Decimal>,
    },

    /// New sort option.
    Sort(SortOption),

    /// Jump to a page.
    Page(u32),
}

/// Shop filter record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopFilters {
    search: String,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    sort: SortOption,
    page: u32,
}

impl Default for ShopFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_price: None,
            max_price: None,
            sort: SortOption::default(),
            page: 1,
        }
    }
}

impl ShopFilters {
    /// Current search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current price range.
    #[must_use]
    pub fn price_range(&self) -> (Option<Decimal>, Option<Decimal>) {
        (self.min_price, self.max_price)
    }

    /// Current sort option.
    #[must_use]
    pub fn sort(&self) -> SortOption {
        self.sort
    }

    /// Current page, starting at 1.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether a search term is active.
    #[must_use]
    pub fn is_search(&self) -> bool {
        !self.search.trim().is_empty()
    }

    /// Reset the page to 1, e.g. after the page size changed.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Apply a change. Any change other than a page change resets the page
    /// to 1.
    ///
    /// Returns whether the record changed.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] when the change is invalid; the record is left
    /// untouched.
    pub fn apply(&mut self, change: FilterChange) -> Result<bool, FilterError> {
        let mut next = self.clone();

        match change {
            FilterChange::Search(term) => {
                next.search = term.trim().to_string();
                next.page = 1;
            }
            FilterChange::PriceRange { min, max } => {
                if [min, max]
                    .into_iter()
                    .flatten()
                    .any(|bound| bound.is_sign_negative())
                {
                    return Err(FilterError::NegativePrice);
                }

                if let (Some(min), Some(max)) = (min, max)
                    && min > max
                {
                    return Err(FilterError::InvalidPriceRange { min, max });
                }

                next.min_price = min;
                next.max_price = max;
                next.page = 1;
            }
            FilterChange::Sort(sort) => {
                next.sort = sort;
                next.page = 1;
            }
            FilterChange::Page(page) => {
                if page == 0 {
                    return Err(FilterError::InvalidPage);
                }

                next.page = page;
            }
        }

        let changed = next != *self;
        *self = next;

        Ok(changed)
    }

    /// Query parameters for the list/search endpoints.
    #[must_use]
    pub fn to_query(&self, limit: u32) -> ShopQuery {
        let (sort_by, sort_order) = self.sort.decompose();
        let mut params = Vec::with_capacity(7);

        if self.is_search() {
            params.push(("q", self.search.clone()));
        }

        params.push(("page", self.page.to_string()));
        params.push(("limit", limit.to_string()));

        if let Some(min) = self.min_price {
            params.push(("minPrice", min.to_string()));
        }

        if let Some(max) = self.max_price {
            params.push(("maxPrice", max.to_string()));
        }

        params.push(("sortBy", sort_by.to_string()));
        params.push(("sortOrder", sort_order.to_string()));

        ShopQuery {
            search: self.is_search(),
            params,
        }
    }
}

/// Query for the shop list or search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopQuery {
    search: bool,
    params: Vec<(&'static str, String)>,
}

impl ShopQuery {
    /// Whether this query targets the search endpoint.
    #[must_use]
    pub fn is_search(&self) -> bool {
        self.search
    }

    /// Query string pairs.
    #[must_use]
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Look up a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }
}
