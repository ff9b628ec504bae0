//! Member address screen: no create from the back office.

use super::{Column, FieldKind, FormField, FormSpec, Paging, ScreenKey, ScreenSpec, ValueType};
use crate::api::{BatchKey, DeleteOneStyle, EntityPath};

const DEFAULT_STATUS: &[(i64, &str)] = &[(0, "否"), (1, "是")];

pub fn spec() -> ScreenSpec {
    ScreenSpec {
        key: ScreenKey::MemberAddress,
        nav_label: "会员地址",
        header_title: "会员地址列表",
        path: EntityPath::new("ums", "member_address"),
        columns: vec![
            Column::new("编号", "id").no_search(),
            Column::new("会员", "memberId").detail_link(),
            Column::new("收货人名称", "name"),
            Column::new("收货人电话", "phoneNumber"),
            Column::new("是否为默认", "defaultStatus").value_type(ValueType::Enum(DEFAULT_STATUS)),
            Column::new("邮政编码", "postCode"),
            Column::new("省份/直辖市", "province"),
            Column::new("城市", "city"),
            Column::new("区", "region"),
            Column::new("详细地址(街道)", "detailAddress").no_search(),
        ],
        title_field: "name",
        search_form: true,
        create_form: None,
        child_form: None,
        update_form: Some(FormSpec::new(
            "修改会员地址",
            vec![
                FormField::hidden_id(),
                FormField::text("name", "收货人名称").required("请输入收货人名称！"),
                FormField::text("phoneNumber", "收货人电话").required("请输入收货人电话！"),
                FormField::text("defaultStatus", "是否为默认")
                    .kind(FieldKind::Radio(&[("0", "否"), ("1", "是")]))
                    .numeric(),
                FormField::text("postCode", "邮政编码"),
                FormField::text("province", "省份/直辖市"),
                FormField::text("city", "城市"),
                FormField::text("region", "区"),
                FormField::text("detailAddress", "详细地址(街道)").kind(FieldKind::TextArea),
            ],
        )),
        delete_one: DeleteOneStyle::IdList,
        batch_key: BatchKey::Ids,
        tree: None,
        paging: Paging::Default,
        assign_menus: false,
    }
}
