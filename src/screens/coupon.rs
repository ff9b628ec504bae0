//! Coupon screen.

use super::{Column, FormField, FormSpec, Paging, ScreenKey, ScreenSpec};
use crate::api::{BatchKey, DeleteOneStyle, EntityPath};

fn fields() -> Vec<FormField> {
    vec![
        FormField::text("name", "优惠券名").required("请输入优惠券名！"),
        FormField::text("amount", "金额").required("请输入金额！").numeric(),
        FormField::text("count", "数量").required("请输入数量！").numeric(),
        FormField::text("perLimit", "每人限领张数").numeric(),
        FormField::text("publishCount", "发行数量").numeric(),
    ]
}

pub fn spec() -> ScreenSpec {
    let mut update_fields = vec![FormField::hidden_id()];
    update_fields.extend(fields());

    ScreenSpec {
        key: ScreenKey::Coupon,
        nav_label: "优惠券",
        header_title: "优惠券列表",
        path: EntityPath::new("sms", "coupon"),
        columns: vec![
            Column::new("编号", "id").no_search(),
            Column::new("优惠券名", "name").detail_link(),
            Column::new("数量", "count").no_search(),
            Column::new("金额", "amount").no_search(),
            Column::new("每人限领张数", "perLimit").no_search(),
            Column::new("发行数量", "publishCount").no_search(),
            Column::new("已使用数量", "useCount").no_search(),
            Column::new("领取数量", "receiveCount").no_search(),
        ],
        title_field: "name",
        search_form: true,
        create_form: Some(FormSpec::new("新建优惠券", fields())),
        child_form: None,
        update_form: Some(FormSpec::new("修改优惠券", update_fields)),
        delete_one: DeleteOneStyle::IdList,
        batch_key: BatchKey::Ids,
        tree: None,
        paging: Paging::Default,
        assign_menus: false,
    }
}
