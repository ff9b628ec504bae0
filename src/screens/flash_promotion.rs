//! Flash-sale promotion screen.

use super::{Column, FieldKind, FormField, FormSpec, Paging, ScreenKey, ScreenSpec, ValueType};
use crate::api::{BatchKey, DeleteOneStyle, EntityPath};

const STATUS: &[(i64, &str)] = &[(0, "停用"), (1, "启用")];
const STATUS_OPTIONS: &[(&str, &str)] = &[("0", "停用"), ("1", "启用")];

fn fields() -> Vec<FormField> {
    vec![
        FormField::text("title", "秒杀活动").required("请输入秒杀活动！"),
        FormField::text("startDate", "开始日期"),
        FormField::text("endDate", "结束日期"),
        FormField::text("status", "上下线状态")
            .kind(FieldKind::Select(STATUS_OPTIONS))
            .numeric(),
    ]
}

pub fn spec() -> ScreenSpec {
    let mut update_fields = vec![FormField::hidden_id()];
    update_fields.extend(fields());

    ScreenSpec {
        key: ScreenKey::FlashPromotion,
        nav_label: "秒杀活动",
        header_title: "秒杀活动列表",
        path: EntityPath::new("sms", "flash_promotion"),
        columns: vec![
            Column::new("编号", "id").no_search(),
            Column::new("秒杀活动", "title").detail_link(),
            Column::new("开始日期", "startDate").no_search(),
            Column::new("结束日期", "endDate").no_search(),
            Column::new("上下线状态", "status").value_type(ValueType::Enum(STATUS)),
        ],
        title_field: "title",
        search_form: true,
        create_form: Some(FormSpec::new("新建秒杀活动", fields())),
        child_form: None,
        update_form: Some(FormSpec::new("修改秒杀信息", update_fields)),
        delete_one: DeleteOneStyle::IdList,
        batch_key: BatchKey::Ids,
        tree: None,
        paging: Paging::Default,
        assign_menus: false,
    }
}
