use std::str::FromStr;

use serde::Deserialize;
use taskhub_core::domain::pagination::value_objects::{ListQuery, PageRequest, SortOrder};
use utoipa::IntoParams;

use crate::application::http::server::api_entities::api_error::ApiError;

fn default_limit() -> u64 {
    10
}

/// Query string shared by every list endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// JSON array of `[attribute, operator, value]` triples.
    #[serde(default)]
    #[param(example = r#"[["status","=","active"]]"#)]
    pub filters: String,

    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: u64,

    #[serde(default)]
    #[param(default = 0)]
    pub offset: u64,

    /// `asc` or `desc`.
    #[serde(default)]
    pub order_by: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            filters: String::new(),
            limit: default_limit(),
            offset: 0,
            order_by: None,
        }
    }
}

impl TryFrom<ListParams> for ListQuery {
    type Error = ApiError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let order_by = match params.order_by.as_deref() {
            Some(raw) if !raw.trim().is_empty() => SortOrder::from_str(raw.trim())?,
            _ => SortOrder::Asc,
        };

        Ok(ListQuery {
            filters: params.filters,
            page: PageRequest::new(params.limit, params.offset, order_by),
        })
    }
}
