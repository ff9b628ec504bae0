//! System log screen: read and delete only.

use super::{Column, Paging, ScreenKey, ScreenSpec, ValueType};
use crate::api::{BatchKey, DeleteOneStyle, EntityPath};

pub fn spec() -> ScreenSpec {
    ScreenSpec {
        key: ScreenKey::SysLog,
        nav_label: "系统日志",
        header_title: "日志列表",
        path: EntityPath::new("sys", "log"),
        columns: vec![
            Column::new("用户名", "userName").detail_link(),
            Column::new("用户操作", "operation"),
            Column::new("请求方法", "method"),
            Column::new("执行时间(毫秒)", "time").no_search(),
            Column::new("IP地址", "ip"),
            Column::new("创建时间", "createTime").no_search().sortable().value_type(ValueType::DateTime),
        ],
        title_field: "userName",
        search_form: false,
        create_form: None,
        child_form: None,
        update_form: None,
        delete_one: DeleteOneStyle::Id,
        batch_key: BatchKey::Ids,
        tree: None,
        paging: Paging::Fixed(10),
        assign_menus: false,
    }
}
