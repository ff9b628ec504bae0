//! Menu screen: tree table with child-add.

use super::{Column, FormField, FormSpec, Paging, ScreenKey, ScreenSpec, ValueType};
use crate::api::{BatchKey, DeleteOneStyle, EntityPath};
use crate::tree::TreeSpec;

const UPDATE_FIELDS: &[&str] = &["name", "id", "parent_id", "url", "type", "order_num", "icon", "perms"];

fn create_fields() -> Vec<FormField> {
    vec![
        FormField::text("name", "菜单名称").required("请输入菜单名称！"),
        FormField::text("type", "类型").numeric(),
        FormField::text("icon", "图标"),
        FormField::text("order_num", "排序").numeric(),
        FormField::text("url", "路径"),
    ]
}

pub fn spec() -> ScreenSpec {
    ScreenSpec {
        key: ScreenKey::Menu,
        nav_label: "菜单管理",
        header_title: "菜单列表",
        path: EntityPath::new("sys", "menu"),
        columns: vec![
            Column::new("菜单名称", "name").detail_link(),
            Column::new("父id", "parent_id").no_search().hidden(),
            Column::new("路径", "url"),
            Column::new("类型", "type").no_search(),
            Column::new("排序", "order_num").no_search(),
            Column::new("图标", "icon").no_search(),
            Column::new("权限", "perms").no_search().hidden(),
            Column::new("创建人", "create_by").no_search(),
            Column::new("创建时间", "create_time").no_search().value_type(ValueType::DateTime),
            Column::new("更新人", "last_update_by").no_search(),
            Column::new("更新时间", "last_update_time").no_search().value_type(ValueType::DateTime),
        ],
        title_field: "name",
        search_form: true,
        create_form: Some(FormSpec::new("新建菜单", create_fields())),
        child_form: Some(FormSpec::new("新建子菜单", create_fields())),
        update_form: Some(
            FormSpec::new(
                "修改菜单",
                vec![
                    FormField::hidden_id(),
                    FormField::text("name", "菜单名称").required("请输入菜单名称！"),
                    FormField::text("parent_id", "父id").numeric(),
                    FormField::text("url", "路径"),
                    FormField::text("type", "类型").numeric(),
                    FormField::text("order_num", "排序").numeric(),
                    FormField::text("icon", "图标"),
                    FormField::text("perms", "权限"),
                ],
            )
            .submitting(UPDATE_FIELDS),
        ),
        delete_one: DeleteOneStyle::Id,
        batch_key: BatchKey::Ids,
        tree: Some(TreeSpec::new(0, "parent_id")),
        paging: Paging::Off,
        assign_menus: false,
    }
}
