use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const MAX_PAGE_LIMIT: u64 = 100;

/// Largest offset a store accepts (bound as a signed 64-bit integer).
pub const MAX_PAGE_OFFSET: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CoreError::Validation(format!(
                "order_by must be `asc` or `desc`, got `{other}`"
            ))),
        }
    }
}

/// Which count `total_items` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalCountMode {
    /// Count every row of the entity, ignoring the filter.
    #[default]
    Unfiltered,
    /// Count only the rows matching the filter.
    Filtered,
}

impl FromStr for TotalCountMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unfiltered" => Ok(TotalCountMode::Unfiltered),
            "filtered" => Ok(TotalCountMode::Filtered),
            other => Err(CoreError::Validation(format!(
                "unknown total count mode `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
    pub order_by: SortOrder,
}

impl PageRequest {
    pub fn new(limit: u64, offset: u64, order_by: SortOrder) -> Self {
        Self {
            limit,
            offset,
            order_by,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.limit == 0 || self.limit > MAX_PAGE_LIMIT {
            return Err(CoreError::Validation(format!(
                "limit ({}) must be between 1-{MAX_PAGE_LIMIT}",
                self.limit
            )));
        }

        if self.offset > MAX_PAGE_OFFSET {
            return Err(CoreError::Validation(format!(
                "offset ({}) must be at most {MAX_PAGE_OFFSET}",
                self.offset
            )));
        }

        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(10, 0, SortOrder::Asc)
    }
}

/// Filter expression plus page bounds, as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub filters: String,
    pub page: PageRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginationWindow<T> {
    pub items: Vec<T>,
    pub pagination_items: u64,
    pub total_items: u64,
    pub remaining_elements: u64,
}

impl<T> PaginationWindow<T> {
    pub fn new(items: Vec<T>, total_items: u64, offset: u64) -> Self {
        let pagination_items = items.len() as u64;

        Self {
            items,
            pagination_items,
            total_items,
            remaining_elements: remaining_elements(total_items, offset, pagination_items),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginationWindow<U> {
        PaginationWindow {
            items: self.items.into_iter().map(f).collect(),
            pagination_items: self.pagination_items,
            total_items: self.total_items,
            remaining_elements: self.remaining_elements,
        }
    }
}

/// `total - offset - page_len`, clamped at zero.
pub fn remaining_elements(total_items: u64, offset: u64, pagination_items: u64) -> u64 {
    total_items
        .saturating_sub(offset)
        .saturating_sub(pagination_items)
}
