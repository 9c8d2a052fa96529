use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Bound as a query parameter, never inlined.
    Value(Value),
    /// The proposed row of an `ON CONFLICT` clause, `EXCLUDED."column"`.
    Excluded(String),
}
