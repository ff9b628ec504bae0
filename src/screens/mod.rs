//! Entity Screens
//!
//! Each back-office screen is a table configuration; the generic
//! `CrudTable` renders it.

mod coupon;
mod flash_promotion;
mod member_address;
mod menu;
mod order_setting;
mod role;
mod syslog;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::api::{BatchKey, DeleteOneStyle, EntityPath};
use crate::models::Record;
use crate::tree::TreeSpec;

/// Screens available in the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenKey {
    SysLog,
    OrderSetting,
    Coupon,
    FlashPromotion,
    #[default]
    Menu,
    Role,
    MemberAddress,
}

impl ScreenKey {
    pub const ALL: [ScreenKey; 7] = [
        ScreenKey::Menu,
        ScreenKey::Role,
        ScreenKey::SysLog,
        ScreenKey::OrderSetting,
        ScreenKey::Coupon,
        ScreenKey::FlashPromotion,
        ScreenKey::MemberAddress,
    ];

    pub fn spec(self) -> ScreenSpec {
        match self {
            ScreenKey::SysLog => syslog::spec(),
            ScreenKey::OrderSetting => order_setting::spec(),
            ScreenKey::Coupon => coupon::spec(),
            ScreenKey::FlashPromotion => flash_promotion::spec(),
            ScreenKey::Menu => menu::spec(),
            ScreenKey::Role => role::spec(),
            ScreenKey::MemberAddress => member_address::spec(),
        }
    }
}

/// Paging behaviour of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// Load everything at once
    Off,
    /// Configured default page size
    Default,
    Fixed(u32),
}

impl Paging {
    pub fn page_size(self, default: u32) -> Option<u32> {
        match self {
            Paging::Off => None,
            Paging::Default => Some(default),
            Paging::Fixed(n) => Some(n),
        }
    }
}

/// Full description of one entity screen
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSpec {
    pub key: ScreenKey,
    pub nav_label: &'static str,
    pub header_title: &'static str,
    pub path: EntityPath,
    pub columns: Vec<Column>,
    /// Field used as the detail drawer title
    pub title_field: &'static str,
    pub search_form: bool,
    pub create_form: Option<FormSpec>,
    pub child_form: Option<FormSpec>,
    pub update_form: Option<FormSpec>,
    pub delete_one: DeleteOneStyle,
    pub batch_key: BatchKey,
    pub tree: Option<TreeSpec>,
    pub paging: Paging,
    pub assign_menus: bool,
}

impl ScreenSpec {
    pub fn table_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.hide_in_table)
    }

    pub fn search_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(move |c| self.search_form && !c.hide_in_search)
    }
}

/// How a cell value is displayed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueType {
    Text,
    TextArea,
    DateTime,
    /// Integer code -> label
    Enum(&'static [(i64, &'static str)]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub data_index: &'static str,
    pub value_type: ValueType,
    pub hide_in_search: bool,
    pub hide_in_table: bool,
    pub sortable: bool,
    /// Cell text opens the detail drawer
    pub opens_detail: bool,
}

impl Column {
    pub fn new(title: &'static str, data_index: &'static str) -> Self {
        Self {
            title,
            data_index,
            value_type: ValueType::Text,
            hide_in_search: false,
            hide_in_table: false,
            sortable: false,
            opens_detail: false,
        }
    }

    pub fn no_search(mut self) -> Self {
        self.hide_in_search = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide_in_table = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn detail_link(mut self) -> Self {
        self.opens_detail = true;
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Display text for this column of `record`
    pub fn render(&self, record: &Record) -> String {
        const EMPTY: &str = "-";
        let Some(value) = record.get(self.data_index).filter(|v| !v.is_null()) else {
            return EMPTY.to_string();
        };

        match self.value_type {
            ValueType::Enum(options) => record
                .int_field(self.data_index)
                .and_then(|code| options.iter().find(|(c, _)| *c == code))
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| plain(value)),
            ValueType::DateTime => format_date_time(value),
            ValueType::Text | ValueType::TextArea => plain(value),
        }
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Epoch milliseconds are shown in UTC; RFC 3339 strings keep their own
/// offset; anything else is shown as sent.
fn format_date_time(value: &Value) -> String {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.format(DATE_TIME_FORMAT).to_string())
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_local().format(DATE_TIME_FORMAT).to_string())
            .unwrap_or_else(|_| s.clone()),
        other => plain(other),
    }
}

/// A create/update form
#[derive(Debug, Clone, PartialEq)]
pub struct FormSpec {
    pub title: &'static str,
    pub fields: Vec<FormField>,
    /// When set, only these fields (plus `id`) are sent
    pub submit_fields: Option<&'static [&'static str]>,
}

impl FormSpec {
    pub fn new(title: &'static str, fields: Vec<FormField>) -> Self {
        Self {
            title,
            fields,
            submit_fields: None,
        }
    }

    pub fn submitting(mut self, fields: &'static [&'static str]) -> Self {
        self.submit_fields = Some(fields);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    /// value -> label
    Select(&'static [(&'static str, &'static str)]),
    Radio(&'static [(&'static str, &'static str)]),
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Message shown when the field is blank
    pub required: Option<&'static str>,
    pub min_len: Option<usize>,
    /// Coerce the text to a JSON number
    pub numeric: bool,
}

impl FormField {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: None,
            min_len: None,
            numeric: false,
        }
    }

    pub fn hidden_id() -> Self {
        Self::text("id", "主键").kind(FieldKind::Hidden).numeric()
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}
