use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

/// Column types used by the destination table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    Text,
    BigInt,
}

impl DataType {
    pub fn postgres_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Text => Cow::Borrowed("TEXT"),
            DataType::BigInt => Cow::Borrowed("BIGINT"),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.postgres_name())
    }
}
