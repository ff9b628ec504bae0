//! Order settings screen: timeouts, edited in place.

use super::{Column, FormField, FormSpec, Paging, ScreenKey, ScreenSpec};
use crate::api::{BatchKey, DeleteOneStyle, EntityPath};

pub fn spec() -> ScreenSpec {
    ScreenSpec {
        key: ScreenKey::OrderSetting,
        nav_label: "订单设置",
        header_title: "订单设置",
        path: EntityPath::new("oms", "order_setting"),
        columns: vec![
            Column::new("编号", "id").no_search().detail_link(),
            Column::new("秒杀订单超时关闭时间(分)", "flashOrderOvertime").no_search(),
            Column::new("正常订单超时时间(分)", "normalOrderOvertime").no_search(),
            Column::new("发货后自动确认收货时间（天）", "confirmOvertime").no_search(),
            Column::new("自动完成交易时间（天）", "finishOvertime").no_search(),
            Column::new("订单完成后自动好评时间（天）", "commentOvertime").no_search(),
        ],
        title_field: "id",
        search_form: false,
        create_form: None,
        child_form: None,
        update_form: Some(FormSpec::new(
            "修改订单设置",
            vec![
                FormField::hidden_id(),
                FormField::text("flashOrderOvertime", "秒杀订单超时关闭时间(分)").numeric(),
                FormField::text("normalOrderOvertime", "正常订单超时时间(分)").numeric(),
                FormField::text("confirmOvertime", "发货后自动确认收货时间（天）").numeric(),
                FormField::text("finishOvertime", "自动完成交易时间（天）").numeric(),
                FormField::text("commentOvertime", "订单完成后自动好评时间（天）").numeric(),
            ],
        )),
        delete_one: DeleteOneStyle::IdList,
        batch_key: BatchKey::Ids,
        tree: None,
        paging: Paging::Default,
        assign_menus: false,
    }
}
