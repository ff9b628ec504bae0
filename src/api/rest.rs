//! REST Transport
//!
//! `POST` + JSON against `/api/<module>/<entity>/<action>`.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ApiError, ApiResult, BatchKey, DeleteOneStyle, EntityPath, QueryParams, RemoteSource};
use crate::models::{ListPage, Pagination, Record, RecordId};

/// [`RemoteSource`] over HTTP for one entity
#[derive(Debug, Clone)]
pub struct RestSource {
    client: reqwest::Client,
    base: String,
    path: EntityPath,
    delete_one: DeleteOneStyle,
    batch_key: BatchKey,
}

impl RestSource {
    pub fn new(
        client: reqwest::Client,
        base: impl Into<String>,
        path: EntityPath,
        delete_one: DeleteOneStyle,
        batch_key: BatchKey,
    ) -> Self {
        Self {
            client,
            base: base.into(),
            path,
            delete_one,
            batch_key,
        }
    }

    async fn post(&self, action: &str, body: &Value) -> ApiResult<Value> {
        let url = self.path.action(&self.base, action);
        log::debug!("[API] POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
        check_envelope(value)
    }
}

#[async_trait(?Send)]
impl RemoteSource for RestSource {
    async fn list(&self, params: &QueryParams) -> ApiResult<ListPage> {
        let value = self.post("list", &params.to_body()).await?;
        parse_list_page(value)
    }

    async fn add(&self, record: &Record) -> ApiResult<()> {
        let mut payload = record.clone();
        payload.remove("id");
        self.post("add", &payload.into_value()).await.map(|_| ())
    }

    async fn update(&self, record: &Record) -> ApiResult<()> {
        self.post("update", &record.clone().into_value()).await.map(|_| ())
    }

    async fn delete_one(&self, id: RecordId) -> ApiResult<()> {
        self.post("delete", &delete_one_body(self.delete_one, id)).await.map(|_| ())
    }

    async fn delete_many(&self, ids: &[RecordId]) -> ApiResult<()> {
        self.post("delete", &delete_many_body(self.batch_key, ids)).await.map(|_| ())
    }

    async fn call(&self, action: &str, body: Value) -> ApiResult<Value> {
        self.post(action, &body).await
    }
}

fn delete_one_body(style: DeleteOneStyle, id: RecordId) -> Value {
    match style {
        DeleteOneStyle::Id => json!({ "id": id }),
        DeleteOneStyle::IdList => json!({ "ids": [id] }),
    }
}

fn delete_many_body(key: BatchKey, ids: &[RecordId]) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(key.field().to_string(), json!(ids));
    Value::Object(body)
}

/// Turn a business-level failure reported in a 2xx body into an error.
///
/// `{"success": false}` and a numeric `code` other than 0/200 both count.
fn check_envelope(value: Value) -> ApiResult<Value> {
    let Some(obj) = value.as_object() else {
        return Ok(value);
    };

    let message = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .unwrap_or("request failed")
            .to_string()
    };

    if obj.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Rejected(message(&["errorMessage", "msg", "message"])));
    }
    if let Some(code) = obj.get("code").and_then(Value::as_i64) {
        if code != 0 && code != 200 {
            return Err(ApiError::Rejected(message(&["msg", "message", "errorMessage"])));
        }
    }
    Ok(value)
}

/// Accepts `{list, pagination}`, the same wrapped in `data`,
/// or a `{data: [...], total}` page.
fn parse_list_page(value: Value) -> ApiResult<ListPage> {
    let decode = |v: Value| serde_json::from_value::<ListPage>(v).map_err(|e| ApiError::Decode(e.to_string()));

    match value {
        Value::Object(mut obj) => {
            if obj.contains_key("list") {
                return decode(Value::Object(obj));
            }
            match obj.remove("data") {
                Some(data @ Value::Object(_)) => decode(data),
                Some(Value::Array(rows)) => {
                    let list = rows
                        .into_iter()
                        .map(|row| match row {
                            Value::Object(map) => Ok(Record::from(map)),
                            other => Err(ApiError::Decode(format!("row is not an object: {}", other))),
                        })
                        .collect::<ApiResult<Vec<_>>>()?;
                    let total = obj.get("total").and_then(Value::as_u64);
                    Ok(ListPage {
                        list,
                        pagination: Pagination {
                            total,
                            ..Default::default()
                        },
                    })
                }
                _ => Err(ApiError::Decode("list response has no rows".into())),
            }
        }
        other => Err(ApiError::Decode(format!("expected an object, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_bodies() {
        assert_eq!(delete_one_body(DeleteOneStyle::Id, 4), json!({"id": 4}));
        assert_eq!(delete_one_body(DeleteOneStyle::IdList, 4), json!({"ids": [4]}));
        assert_eq!(delete_many_body(BatchKey::Ids, &[1, 2]), json!({"ids": [1, 2]}));
        assert_eq!(delete_many_body(BatchKey::Key, &[3]), json!({"key": [3]}));
    }

    #[test]
    fn test_check_envelope() {
        assert!(check_envelope(json!({"code": 0, "msg": "ok"})).is_ok());
        assert!(check_envelope(json!({"code": 200})).is_ok());
        assert!(check_envelope(json!({"success": true})).is_ok());
        assert!(check_envelope(Value::Null).is_ok());

        assert_eq!(
            check_envelope(json!({"success": false, "errorMessage": "无权限"})),
            Err(ApiError::Rejected("无权限".into()))
        );
        assert_eq!(
            check_envelope(json!({"code": 1, "msg": "名称已存在"})),
            Err(ApiError::Rejected("名称已存在".into()))
        );
        assert_eq!(
            check_envelope(json!({"code": 500})),
            Err(ApiError::Rejected("request failed".into()))
        );
    }

    #[test]
    fn test_parse_list_page_shapes() {
        let bare = parse_list_page(json!({
            "list": [{"id": 1}],
            "pagination": {"total": 31, "pageSize": 10, "current": 2}
        }))
        .unwrap();
        assert_eq!(bare.list.len(), 1);
        assert_eq!(bare.total(), 31);
        assert_eq!(bare.pagination.current, Some(2));

        let wrapped = parse_list_page(json!({"code": 0, "data": {"list": [{"id": 1}, {"id": 2}]}})).unwrap();
        assert_eq!(wrapped.total(), 2);

        let flat = parse_list_page(json!({"data": [{"id": 5}], "total": 9, "success": true})).unwrap();
        assert_eq!(flat.list[0].id(), Some(5));
        assert_eq!(flat.total(), 9);
    }

    #[test]
    fn test_parse_list_page_rejects_garbage() {
        assert!(matches!(parse_list_page(json!([1, 2])), Err(ApiError::Decode(_))));
        assert!(matches!(parse_list_page(json!({"rows": []})), Err(ApiError::Decode(_))));
        assert!(matches!(parse_list_page(json!({"data": [1]})), Err(ApiError::Decode(_))));
    }
}
