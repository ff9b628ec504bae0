//! Role screen, with menu assignment.

use super::{Column, FieldKind, FormField, FormSpec, Paging, ScreenKey, ScreenSpec, ValueType};
use crate::api::{BatchKey, DeleteOneStyle, EntityPath};

const DEL_FLAG: &[(i64, &str)] = &[(0, "正常"), (1, "已删除")];

const REMARK_RULE: &str = "请输入至少五个字符的规则描述！";

pub fn spec() -> ScreenSpec {
    ScreenSpec {
        key: ScreenKey::Role,
        nav_label: "角色管理",
        header_title: "角色列表",
        path: EntityPath::new("sys", "role"),
        columns: vec![
            Column::new("编号", "id").no_search(),
            Column::new("角色名称", "name").detail_link(),
            Column::new("备注", "remark").no_search().value_type(ValueType::TextArea),
            Column::new("状态", "del_flag").value_type(ValueType::Enum(DEL_FLAG)),
            Column::new("创建人", "create_by").no_search(),
            Column::new("创建时间", "create_time").no_search().sortable().value_type(ValueType::DateTime),
            Column::new("更新人", "last_update_by").no_search(),
            Column::new("更新时间", "last_update_time").no_search().sortable().value_type(ValueType::DateTime),
        ],
        title_field: "name",
        search_form: true,
        create_form: Some(FormSpec::new(
            "新建角色",
            vec![
                FormField::text("name", "角色名称").required("请输入角色名称！"),
                FormField::text("remark", "备注")
                    .kind(FieldKind::TextArea)
                    .required(REMARK_RULE)
                    .min_len(5),
            ],
        )),
        child_form: None,
        update_form: Some(
            FormSpec::new(
                "修改角色",
                vec![
                    FormField::hidden_id(),
                    FormField::text("name", "角色名称").required("请输入角色名称！"),
                    FormField::text("remark", "备注")
                        .kind(FieldKind::TextArea)
                        .required(REMARK_RULE)
                        .min_len(5),
                ],
            )
            .submitting(&["name", "remark", "id"]),
        ),
        delete_one: DeleteOneStyle::Id,
        batch_key: BatchKey::Key,
        tree: None,
        paging: Paging::Default,
        assign_menus: true,
    }
}
