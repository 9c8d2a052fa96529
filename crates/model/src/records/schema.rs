use crate::core::data_type::DataType;

/// A destination column and its SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub data_type: DataType,
}

const fn text(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        data_type: DataType::Text,
    }
}

const fn bigint(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        data_type: DataType::BigInt,
    }
}

/// Primary key of the destination table.
pub const KEY_COLUMN: &str = "issue_id";

/// Ordered column set of a synced issue row.
pub const ISSUE_COLUMNS: &[ColumnDef] = &[
    text(KEY_COLUMN),
    text("client_name"),
    text("team"),
    text("assignee"),
    text("components"),
    text("status"),
    text("priority"),
    text("summary"),
    text("reporter"),
    text("created"),
    text("with_core_product"),
    text("done"),
    text("pending_close"),
    bigint("time_to_core_product"),
    bigint("time_to_done"),
    bigint("time_to_pending_close"),
    text("linked_issue_keys"),
];

pub fn column_names() -> impl Iterator<Item = &'static str> {
    ISSUE_COLUMNS.iter().map(|col| col.name)
}
