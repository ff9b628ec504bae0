//! List Query Parameters

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Column sort direction, in the wire spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascend,
    Descend,
}

impl SortOrder {
    /// Header click cycle: none -> ascend -> descend -> none
    pub fn cycle(current: Option<SortOrder>) -> Option<SortOrder> {
        match current {
            None => Some(SortOrder::Ascend),
            Some(SortOrder::Ascend) => Some(SortOrder::Descend),
            Some(SortOrder::Descend) => None,
        }
    }
}

/// Everything a list request carries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    /// Search form values, sent as top-level fields
    pub fields: Map<String, Value>,
    pub current: Option<u32>,
    pub page_size: Option<u32>,
    pub sorter: BTreeMap<String, SortOrder>,
    pub filter: BTreeMap<String, Vec<Value>>,
}

impl QueryParams {
    pub fn first_page(page_size: Option<u32>) -> Self {
        Self {
            current: page_size.map(|_| 1),
            page_size,
            ..Default::default()
        }
    }

    /// Request body: search fields spread at top level, blanks dropped
    pub fn to_body(&self) -> Value {
        let mut body: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(_, v)| !is_blank(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if let Some(current) = self.current {
            body.insert("current".into(), current.into());
        }
        if let Some(page_size) = self.page_size {
            body.insert("pageSize".into(), page_size.into());
        }

        let sorter: Map<String, Value> = self
            .sorter
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect();
        body.insert("sorter".into(), Value::Object(sorter));

        let filter: Map<String, Value> = self
            .filter
            .iter()
            .map(|(k, v)| (k.clone(), Value::Array(v.clone())))
            .collect();
        body.insert("filter".into(), Value::Object(filter));

        Value::Object(body)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_body_spreads_fields_and_drops_blanks() {
        let mut params = QueryParams::first_page(Some(10));
        params.fields.insert("name".into(), json!("首页"));
        params.fields.insert("url".into(), json!("  "));
        params.fields.insert("type".into(), Value::Null);
        params.sorter.insert("create_time".into(), SortOrder::Descend);
        params.filter.insert("status".into(), vec![json!(0), json!(1)]);

        assert_eq!(
            params.to_body(),
            json!({
                "name": "首页",
                "current": 1,
                "pageSize": 10,
                "sorter": {"create_time": "descend"},
                "filter": {"status": [0, 1]}
            })
        );
    }

    #[test]
    fn test_unpaged_body_has_no_page_fields() {
        let body = QueryParams::first_page(None).to_body();

        assert_eq!(body, json!({"sorter": {}, "filter": {}}));
    }

    #[test]
    fn test_sort_cycle() {
        assert_eq!(SortOrder::cycle(None), Some(SortOrder::Ascend));
        assert_eq!(SortOrder::cycle(Some(SortOrder::Ascend)), Some(SortOrder::Descend));
        assert_eq!(SortOrder::cycle(Some(SortOrder::Descend)), None);
    }
}
