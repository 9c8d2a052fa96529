use crate::query::{
    ast::expr::Expr,
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Value(value) => r.add_param(value.clone()),
            Expr::Excluded(column) => {
                r.sql.push_str("EXCLUDED.");
                r.sql.push_str(&r.dialect.quote_identifier(column));
            }
        }
    }
}
