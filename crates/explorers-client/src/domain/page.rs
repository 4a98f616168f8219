//! List Queries and Page Results
//!
//! Page numbers are 1-based everywhere in this crate. `ListQuery::to_params`
//! is the single place they become the API's 0-based `pageNumber`, and
//! `WireList::into_page` is the single place they come back.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_SIZE;

/// Sort direction for `order`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// How `filter` is compared against the filtered field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    #[default]
    Equals,
    Contains,
    StartsWith,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "eq",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "startsWith",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "eq" => Some(FilterOperator::Equals),
            "contains" => Some(FilterOperator::Contains),
            "startsWith" => Some(FilterOperator::StartsWith),
            _ => None,
        }
    }
}

/// Parameters of a list fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Free-text search
    pub key: Option<String>,
    /// Value for the kind's filter field
    pub filter: Option<String>,
    pub operator: Option<FilterOperator>,
    /// Field to sort by
    pub order: Option<String>,
    pub direction: Option<SortDirection>,
    /// 1-based
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            key: None,
            filter: None,
            operator: None,
            order: None,
            direction: None,
            page_number: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>, operator: Option<FilterOperator>) -> Self {
        self.filter = Some(filter.into());
        self.operator = operator;
        self
    }

    pub fn with_order(mut self, order: impl Into<String>, direction: SortDirection) -> Self {
        self.order = Some(order.into());
        self.direction = Some(direction);
        self
    }

    pub fn with_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number.max(1);
        self
    }

    /// Wire parameters in canonical order
    ///
    /// Absent and blank values are omitted; `pageNumber` is 0-based.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(7);
        push_text(&mut params, "key", self.key.as_deref());
        push_text(&mut params, "filter", self.filter.as_deref());
        if has_text(self.filter.as_deref()) {
            if let Some(op) = self.operator {
                params.push(("operator", op.as_str().to_string()));
            }
        }
        push_text(&mut params, "order", self.order.as_deref());
        if has_text(self.order.as_deref()) {
            if let Some(direction) = self.direction {
                params.push(("direction", direction.as_str().to_string()));
            }
        }
        params.push(("pageSize", self.page_size.max(1).to_string()));
        params.push(("pageNumber", self.page_number.saturating_sub(1).to_string()));
        params
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn push_text(params: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&str>) {
    if let Some(v) = value {
        let v = v.trim();
        if !v.is_empty() {
            params.push((name, v.to_string()));
        }
    }
}

/// `ceil(count / page_size)`
pub fn total_pages_for(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let size = page_size as u64;
    ((total_count + size - 1) / size) as u32
}

/// One page of a list fetch
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<R> {
    pub items: Vec<R>,
    pub total_count: u64,
    pub total_pages: u32,
    /// 1-based
    pub page_number: u32,
}

impl<R> Default for PageResult<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            page_number: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WirePage<R> {
    #[serde(alias = "data", default = "Vec::new")]
    items: Vec<R>,
    total_count: Option<u64>,
    total_pages: Option<u32>,
    /// 0-based
    page_number: Option<u32>,
}

/// List response: a page envelope, or a bare array from endpoints without paging
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireList<R> {
    Page(WirePage<R>),
    Bare(Vec<R>),
}

impl<R> WireList<R> {
    pub(crate) fn into_page(self, requested: &ListQuery) -> PageResult<R> {
        match self {
            WireList::Page(page) => {
                let total_count = page.total_count.unwrap_or(page.items.len() as u64);
                PageResult {
                    total_pages: page
                        .total_pages
                        .unwrap_or_else(|| total_pages_for(total_count, requested.page_size)),
                    page_number: page
                        .page_number
                        .map(|p| p + 1)
                        .unwrap_or(requested.page_number),
                    total_count,
                    items: page.items,
                }
            }
            // Unpaged endpoint: cut the requested page out of the whole list
            WireList::Bare(mut items) => {
                let total_count = items.len() as u64;
                let size = requested.page_size as usize;
                if size > 0 {
                    let start = (requested.page_number.saturating_sub(1) as usize)
                        .saturating_mul(size)
                        .min(items.len());
                    items.drain(..start);
                    items.truncate(size);
                }
                PageResult {
                    total_pages: total_pages_for(total_count, requested.page_size),
                    page_number: requested.page_number,
                    total_count,
                    items,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_sends_only_paging() {
        let params = ListQuery::new(25).to_params();
        assert_eq!(
            params,
            vec![("pageSize", "25".to_string()), ("pageNumber", "0".to_string())]
        );
    }

    #[test]
    fn page_number_becomes_zero_based() {
        let params = ListQuery::new(10).with_page(3).to_params();
        assert!(params.contains(&("pageNumber", "2".to_string())));
    }

    #[test]
    fn blank_values_are_omitted() {
        let query = ListQuery::new(10)
            .with_key("   ")
            .with_filter("", Some(FilterOperator::Equals))
            .with_order("", SortDirection::Desc);
        let names: Vec<_> = query.to_params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["pageSize", "pageNumber"]);
    }

    #[test]
    fn operator_and_direction_follow_their_fields() {
        let query = ListQuery::new(10)
            .with_filter("Stamps", Some(FilterOperator::Equals))
            .with_order("name", SortDirection::Desc);
        let params = query.to_params();
        assert!(params.contains(&("operator", "eq".to_string())));
        assert!(params.contains(&("direction", "desc".to_string())));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages_for(0, 10), 0);
        assert_eq!(total_pages_for(10, 10), 1);
        assert_eq!(total_pages_for(11, 10), 2);
        assert_eq!(total_pages_for(5, 0), 0);
    }

    #[test]
    fn envelope_page_number_comes_back_one_based() {
        let wire: WireList<u32> = serde_json::from_str(
            r#"{"items":[1,2],"totalCount":12,"totalPages":2,"pageNumber":1}"#,
        )
        .unwrap();
        let page = wire.into_page(&ListQuery::new(10).with_page(2));
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn legacy_data_envelope_and_bare_arrays_are_accepted() {
        let wire: WireList<u32> = serde_json::from_str(r#"{"data":[1,2,3],"totalCount":3}"#).unwrap();
        let page = wire.into_page(&ListQuery::new(2));
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 2);

        let wire: WireList<u32> = serde_json::from_str("[4,5]").unwrap();
        let page = wire.into_page(&ListQuery::new(10));
        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn bare_arrays_are_cut_to_the_requested_page() {
        let json = "[1,2,3,4,5,6,7]";
        let wire: WireList<u32> = serde_json::from_str(json).unwrap();
        let page = wire.into_page(&ListQuery::new(3).with_page(2));
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_count, 7);
        assert_eq!(page.total_pages, 3);

        let wire: WireList<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(wire.into_page(&ListQuery::new(3).with_page(3)).items, vec![7]);

        let wire: WireList<u32> = serde_json::from_str(json).unwrap();
        assert!(wire.into_page(&ListQuery::new(3).with_page(9)).items.is_empty());
    }
}
