//! Form Values
//!
//! Raw input text <-> record payloads, with the per-field rules.

use std::collections::BTreeMap;

use serde_json::{Number, Value};

use crate::models::Record;
use crate::screens::{FormField, FormSpec};

/// Raw text per field name, as typed into inputs
pub type FormValues = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Starting values: the edited record's fields, or blanks
pub fn initial_values(form: &FormSpec, record: Option<&Record>) -> FormValues {
    form.fields
        .iter()
        .map(|field| {
            let text = record.and_then(|r| r.text(field.name)).unwrap_or_default();
            (field.name.to_string(), text)
        })
        .collect()
}

/// Check every rule and build the payload, or return all field errors
pub fn validate(form: &FormSpec, values: &FormValues) -> Result<Record, Vec<FieldError>> {
    let mut record = Record::new();
    let mut errors = Vec::new();

    for field in &form.fields {
        let raw = values.get(field.name).map(|s| s.trim()).unwrap_or("");
        match check_field(field, raw) {
            Ok(Some(value)) => record.insert(field.name, value),
            Ok(None) => {}
            Err(message) => errors.push(FieldError {
                field: field.name,
                message,
            }),
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(errors)
    }
}

fn check_field(field: &FormField, raw: &str) -> Result<Option<Value>, String> {
    if raw.is_empty() {
        return match field.required {
            Some(message) => Err(message.to_string()),
            // Blank numbers are left out rather than sent as ""
            None if field.numeric => Ok(None),
            None => Ok(Some(Value::String(String::new()))),
        };
    }

    if let Some(min) = field.min_len {
        if raw.chars().count() < min {
            return Err(field
                .required
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}至少{}个字符", field.label, min)));
        }
    }

    if field.numeric {
        return parse_number(raw)
            .map(|n| Some(Value::Number(n)))
            .ok_or_else(|| format!("{}必须是数字", field.label));
    }

    Ok(Some(Value::String(raw.to_string())))
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n.into());
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// First error message for a field, for inline display
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{FieldKind, ScreenKey};
    use serde_json::json;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_required_and_min_len() {
        let form = ScreenKey::Role.spec().create_form.unwrap();

        let errors = validate(&form, &values(&[("name", " "), ("remark", "abc")])).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(error_for(&errors, "name"), Some("请输入角色名称！"));
        assert_eq!(error_for(&errors, "remark"), Some("请输入至少五个字符的规则描述！"));

        let record = validate(&form, &values(&[("name", "运营"), ("remark", "负责日常运营")])).unwrap();
        assert_eq!(record.into_value(), json!({"name": "运营", "remark": "负责日常运营"}));
    }

    #[test]
    fn test_min_len_counts_characters() {
        let form = FormSpec::new("t", vec![FormField::text("remark", "备注").min_len(5)]);

        assert!(validate(&form, &values(&[("remark", "五个汉字呀")])).is_ok());
        let errors = validate(&form, &values(&[("remark", "四个汉字")])).unwrap_err();
        assert_eq!(errors[0].message, "备注至少5个字符");
    }

    #[test]
    fn test_numeric_coercion() {
        let form = ScreenKey::Menu.spec().create_form.unwrap();

        let record = validate(
            &form,
            &values(&[("name", "系统管理"), ("type", "0"), ("order_num", " 3 "), ("icon", ""), ("url", "/sys")]),
        )
        .unwrap();
        assert_eq!(record.get("type"), Some(&json!(0)));
        assert_eq!(record.get("order_num"), Some(&json!(3)));
        assert_eq!(record.get("icon"), Some(&json!("")));

        let errors = validate(&form, &values(&[("name", "x"), ("order_num", "first")])).unwrap_err();
        assert_eq!(error_for(&errors, "order_num"), Some("排序必须是数字"));
    }

    #[test]
    fn test_blank_numeric_is_omitted_and_decimals_kept() {
        let form = ScreenKey::Coupon.spec().create_form.unwrap();

        let record = validate(
            &form,
            &values(&[("name", "满100减10"), ("amount", "10.5"), ("count", "100"), ("perLimit", "")]),
        )
        .unwrap();
        assert_eq!(record.get("amount"), Some(&json!(10.5)));
        assert!(!record.contains("perLimit"));
    }

    #[test]
    fn test_initial_values_from_record() {
        let form = ScreenKey::FlashPromotion.spec().update_form.unwrap();
        let record = Record::new().with("id", 8).with("title", "双十一").with("status", 1);

        let initial = initial_values(&form, Some(&record));

        assert_eq!(initial["id"], "8");
        assert_eq!(initial["title"], "双十一");
        assert_eq!(initial["status"], "1");
        assert_eq!(initial["startDate"], "");
        assert!(matches!(form.fields[4].kind, FieldKind::Select(_)));
    }
}
