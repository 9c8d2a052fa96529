use crate::query::{
    ast::{
        common::TableRef,
        expr::Expr,
        insert::{ConflictAction, ConflictAssignment, Insert, OnConflict},
    },
    value,
};
use model::records::record::Record;

/// Builds a single-row `INSERT ... ON CONFLICT (key) DO UPDATE` statement.
///
/// The column list comes from the record itself, so the statement follows
/// whatever columns the record carries. Every non-key column is overwritten
/// with the incoming value on conflict.
#[derive(Debug, Clone)]
pub struct UpsertBuilder {
    table: TableRef,
    key_columns: Vec<String>,
}

impl UpsertBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            table,
            key_columns: Vec::new(),
        }
    }

    pub fn key(mut self, column: &str) -> Self {
        self.key_columns.push(column.to_string());
        self
    }

    pub fn build(&self, record: &Record) -> Insert {
        let columns: Vec<String> = record.columns().map(str::to_string).collect();
        let row: Vec<Expr> = record.values().cloned().map(value).collect();

        let assignments = columns
            .iter()
            .filter(|col| !self.key_columns.contains(*col))
            .map(|col| ConflictAssignment {
                column: col.clone(),
                value: Expr::Excluded(col.clone()),
            })
            .collect();

        Insert {
            table: self.table.clone(),
            columns,
            values: vec![row],
            on_conflict: Some(OnConflict {
                columns: self.key_columns.clone(),
                action: ConflictAction::DoUpdate { assignments },
            }),
        }
    }
}
