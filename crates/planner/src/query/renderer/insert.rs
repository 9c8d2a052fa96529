use crate::query::{
    ast::insert::{ConflictAction, Insert, OnConflict},
    renderer::Render,
};

impl Render for Insert {
    fn render(&self, r: &mut super::Renderer) {
        // 1. INSERT INTO table (...)
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");
        let quoted_columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| r.dialect.quote_identifier(c))
            .collect();
        r.sql.push_str(&quoted_columns.join(", "));
        r.sql.push(')');

        // 2. VALUES (...)
        render_values(self, r);

        if let Some(on_conflict) = &self.on_conflict {
            render_on_conflict(on_conflict, r);
        }
        r.sql.push(';');
    }
}

fn render_values(insert: &Insert, r: &mut super::Renderer) {
    r.sql.push_str(" VALUES ");
    for (i, row) in insert.values.iter().enumerate() {
        if i > 0 {
            r.sql.push_str(", ");
        }
        r.sql.push('(');
        for (j, val) in row.iter().enumerate() {
            if j > 0 {
                r.sql.push_str(", ");
            }
            val.render(r);
        }
        r.sql.push(')');
    }
}

fn render_on_conflict(on_conflict: &OnConflict, r: &mut super::Renderer) {
    if on_conflict.columns.is_empty() {
        return;
    }

    r.sql.push_str(" ON CONFLICT (");
    let quoted: Vec<String> = on_conflict
        .columns
        .iter()
        .map(|c| r.dialect.quote_identifier(c))
        .collect();
    r.sql.push_str(&quoted.join(", "));
    r.sql.push(')');

    match &on_conflict.action {
        ConflictAction::DoNothing => r.sql.push_str(" DO NOTHING"),
        ConflictAction::DoUpdate { assignments } => {
            if assignments.is_empty() {
                r.sql.push_str(" DO NOTHING");
                return;
            }

            r.sql.push_str(" DO UPDATE SET ");
            for (i, assignment) in assignments.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                r.sql
                    .push_str(&r.dialect.quote_identifier(&assignment.column));
                r.sql.push_str(" = ");
                assignment.value.render(r);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::query::{
        ast::{
            common::TableRef,
            expr::Expr,
            insert::{ConflictAction, ConflictAssignment, Insert, OnConflict},
        },
        dialect::Postgres,
        renderer::{Render, Renderer},
    };

    fn value(val: Value) -> Expr {
        Expr::Value(val)
    }

    fn issues_table() -> TableRef {
        TableRef {
            schema: None,
            name: "issues".to_string(),
        }
    }

    #[test]
    fn test_render_single_row_insert() {
        let ast = Insert {
            table: issues_table(),
            columns: vec!["issue_id".to_string(), "time_to_done".to_string()],
            values: vec![vec![
                value(Value::String("OI-1".to_string())),
                value(Value::Int(4)),
            ]],
            on_conflict: None,
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(
            sql,
            r#"INSERT INTO "issues" ("issue_id", "time_to_done") VALUES ($1, $2);"#
        );
        assert_eq!(
            params,
            vec![Value::String("OI-1".to_string()), Value::Int(4)]
        );
    }

    #[test]
    fn test_render_on_conflict_do_update() {
        let ast = Insert {
            table: TableRef {
                schema: Some("reporting".to_string()),
                name: "issues".to_string(),
            },
            columns: vec!["issue_id".to_string(), "status".to_string()],
            values: vec![vec![
                value(Value::String("OI-1".to_string())),
                value(Value::Null),
            ]],
            on_conflict: Some(OnConflict {
                columns: vec!["issue_id".to_string()],
                action: ConflictAction::DoUpdate {
                    assignments: vec![ConflictAssignment {
                        column: "status".to_string(),
                        value: Expr::Excluded("status".to_string()),
                    }],
                },
            }),
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        let expected_sql = r#"INSERT INTO "reporting"."issues" ("issue_id", "status") VALUES ($1, $2) ON CONFLICT ("issue_id") DO UPDATE SET "status" = EXCLUDED."status";"#;
        assert_eq!(sql, expected_sql);
        assert_eq!(params.len(), 2);
        assert_eq!(params[1], Value::Null);
    }

    #[test]
    fn test_render_on_conflict_without_assignments_does_nothing() {
        let ast = Insert {
            table: issues_table(),
            columns: vec!["issue_id".to_string()],
            values: vec![vec![value(Value::String("OI-1".to_string()))]],
            on_conflict: Some(OnConflict {
                columns: vec!["issue_id".to_string()],
                action: ConflictAction::DoUpdate {
                    assignments: vec![],
                },
            }),
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, _) = renderer.finish();

        assert_eq!(
            sql,
            r#"INSERT INTO "issues" ("issue_id") VALUES ($1) ON CONFLICT ("issue_id") DO NOTHING;"#
        );
    }
}
