//! Flattens a raw tracker issue into one destination record.

use model::{
    core::{time, value::Value},
    issue::RawIssue,
    records::{
        record::Record,
        schema::{ISSUE_COLUMNS, KEY_COLUMN},
    },
};

pub mod milestones;

use milestones::{Milestone, MilestoneTimes};

const LIST_SEPARATOR: &str = ", ";

/// Path under `fields` for each column read straight from the issue.
const DIRECT_FIELDS: &[(&str, &[&str])] = &[
    ("client_name", &["customfield_12310", "value"]),
    ("team", &["customfield_10900", "title"]),
    ("assignee", &["assignee", "displayName"]),
    ("status", &["status", "name"]),
    ("priority", &["priority", "name"]),
    ("summary", &["summary"]),
    ("reporter", &["reporter", "displayName"]),
    ("created", &["created"]),
];

/// Turns raw issues into records matching [`ISSUE_COLUMNS`].
///
/// Infallible: anything missing becomes `NULL`, and every value is fitted
/// to its column's type.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueTransformer;

impl IssueTransformer {
    pub fn new() -> Self {
        Self
    }

    pub fn transform(&self, issue: &RawIssue) -> Record {
        let milestones = MilestoneTimes::scan(issue);
        let created = issue.field_str(&["created"]);

        let mut record = Record::with_capacity(ISSUE_COLUMNS.len());
        for column in ISSUE_COLUMNS {
            let value = match column.name {
                KEY_COLUMN => Value::from_opt_string(issue.key().map(str::to_string)),
                "components" => Value::from_opt_string(components(issue)),
                "linked_issue_keys" => Value::from_opt_string(linked_issue_keys(issue)),
                name => milestone_value(name, &milestones, created)
                    .or_else(|| direct_value(issue, name))
                    .unwrap_or(Value::Null),
            };
            record.set(column.name, value.coerce(column.data_type));
        }

        record
    }
}

/// Raw JSON at a column's field path; composites are flattened by the record.
fn direct_value(issue: &RawIssue, column: &str) -> Option<Value> {
    let (_, path) = DIRECT_FIELDS.iter().find(|(name, _)| *name == column)?;
    issue.field(path).cloned().map(Value::Json)
}

/// Timestamp or elapsed-day value if `column` belongs to a milestone.
fn milestone_value(column: &str, times: &MilestoneTimes, created: Option<&str>) -> Option<Value> {
    Milestone::ALL.iter().find_map(|&milestone| {
        let reached = times.get(milestone);
        if column == milestone.timestamp_column() {
            Some(Value::from_opt_string(reached.map(str::to_string)))
        } else if column == milestone.elapsed_column() {
            let days = reached
                .zip(created)
                .and_then(|(at, created)| time::elapsed_days_between(created, at));
            Some(Value::from_opt_int(days))
        } else {
            None
        }
    })
}

/// Component names joined with `", "`, or `None` if there are none.
fn components(issue: &RawIssue) -> Option<String> {
    let names: Vec<&str> = issue
        .field_array(&["components"])
        .iter()
        .filter_map(|component| component.get("name")?.as_str())
        .collect();
    join_non_empty(&names)
}

/// Keys of linked issues in link order. Each link contributes its outward
/// issue's key, falling back to the inward one when the outward side has none.
fn linked_issue_keys(issue: &RawIssue) -> Option<String> {
    let keys: Vec<&str> = issue
        .field_array(&["issuelinks"])
        .iter()
        .filter_map(|link| {
            ["outwardIssue", "inwardIssue"]
                .iter()
                .find_map(|side| link.get(*side)?.get("key")?.as_str())
        })
        .collect();
    join_non_empty(&keys)
}

fn join_non_empty(parts: &[&str]) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(LIST_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{core::data_type::DataType, records::schema::column_names};
    use serde_json::json;

    fn transform(issue: serde_json::Value) -> Record {
        IssueTransformer::new().transform(&RawIssue::new(issue))
    }

    fn full_issue() -> serde_json::Value {
        json!({
            "key": "OI-42",
            "fields": {
                "customfield_12310": { "id": "1", "value": "Acme Health" },
                "customfield_10900": { "id": 7, "title": "Platform" },
                "assignee": { "displayName": "Sam Lee" },
                "components": [{ "name": "A" }, { "name": "B" }],
                "status": { "name": "Done" },
                "priority": { "name": "High" },
                "summary": "Login broken",
                "reporter": { "displayName": "Kim Park" },
                "created": "2024-01-01T23:00:00.000+0000",
                "issuelinks": [
                    { "type": { "name": "Blocks" }, "outwardIssue": { "key": "OI-1" } },
                    { "type": { "name": "Blocks" }, "inwardIssue": { "key": "CORE-9" } }
                ]
            },
            "changelog": { "histories": [
                {
                    "created": "2024-01-02T01:00:00.000+0000",
                    "items": [{ "field": "status", "toString": "With Core Product" }]
                },
                {
                    "created": "2024-01-04T23:30:00.000+0000",
                    "items": [
                        { "field": "assignee", "toString": "Sam Lee" },
                        { "field": "status", "toString": "Pending Close" }
                    ]
                },
                {
                    "created": "2024-01-05T12:00:00.000+0000",
                    "items": [{ "field": "status", "toString": "Done" }]
                }
            ]}
        })
    }

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_columns_match_schema_order() {
        let record = transform(full_issue());
        assert_eq!(
            record.columns().collect::<Vec<_>>(),
            column_names().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_full_issue() {
        let record = transform(full_issue());

        assert_eq!(record.get_value("issue_id"), text("OI-42"));
        assert_eq!(record.get_value("client_name"), text("Acme Health"));
        assert_eq!(record.get_value("team"), text("Platform"));
        assert_eq!(record.get_value("assignee"), text("Sam Lee"));
        assert_eq!(record.get_value("components"), text("A, B"));
        assert_eq!(record.get_value("status"), text("Done"));
        assert_eq!(record.get_value("priority"), text("High"));
        assert_eq!(record.get_value("summary"), text("Login broken"));
        assert_eq!(record.get_value("reporter"), text("Kim Park"));
        assert_eq!(
            record.get_value("created"),
            text("2024-01-01T23:00:00.000+0000")
        );
        assert_eq!(
            record.get_value("with_core_product"),
            text("2024-01-02T01:00:00.000+0000")
        );
        assert_eq!(
            record.get_value("pending_close"),
            text("2024-01-04T23:30:00.000+0000")
        );
        assert_eq!(
            record.get_value("done"),
            text("2024-01-05T12:00:00.000+0000")
        );
        // Two hours after creation is still day zero.
        assert_eq!(record.get_value("time_to_core_product"), Value::Int(0));
        assert_eq!(record.get_value("time_to_pending_close"), Value::Int(3));
        assert_eq!(record.get_value("time_to_done"), Value::Int(3));
        assert_eq!(record.get_value("linked_issue_keys"), text("OI-1, CORE-9"));
    }

    #[test]
    fn test_bare_issue_degrades_to_nulls() {
        let record = transform(json!({ "key": "OI-1" }));

        assert_eq!(record.len(), ISSUE_COLUMNS.len());
        assert_eq!(record.get_value("issue_id"), text("OI-1"));
        for column in column_names().filter(|c| *c != KEY_COLUMN) {
            assert_eq!(record.get_value(column), Value::Null, "column {column}");
        }
    }

    #[test]
    fn test_null_parents_yield_null() {
        let record = transform(json!({
            "key": "OI-1",
            "fields": {
                "customfield_12310": null,
                "customfield_10900": null,
                "assignee": null,
                "status": null,
                "components": [],
                "issuelinks": []
            }
        }));

        assert_eq!(record.get_value("client_name"), Value::Null);
        assert_eq!(record.get_value("team"), Value::Null);
        assert_eq!(record.get_value("assignee"), Value::Null);
        assert_eq!(record.get_value("status"), Value::Null);
        assert_eq!(record.get_value("components"), Value::Null);
        assert_eq!(record.get_value("linked_issue_keys"), Value::Null);
    }

    #[test]
    fn test_no_status_history_means_no_milestones() {
        let mut issue = full_issue();
        issue["changelog"] = json!({ "histories": [{
            "created": "2024-01-03T00:00:00.000+0000",
            "items": [{ "field": "priority", "toString": "Low" }]
        }]});

        let record = transform(issue);
        for milestone in Milestone::ALL {
            assert_eq!(record.get_value(milestone.timestamp_column()), Value::Null);
            assert_eq!(record.get_value(milestone.elapsed_column()), Value::Null);
        }
    }

    #[test]
    fn test_repeated_done_keeps_last() {
        let mut issue = full_issue();
        issue["changelog"] = json!({ "histories": [
            { "created": "2024-01-03T00:00:00.000+0000",
              "items": [{ "field": "status", "toString": "Done" }] },
            { "created": "2024-01-04T00:00:00.000+0000",
              "items": [{ "field": "status", "toString": "In Progress" }] },
            { "created": "2024-01-11T00:00:00.000+0000",
              "items": [{ "field": "status", "toString": "Done" }] }
        ]});

        let record = transform(issue);
        assert_eq!(
            record.get_value("done"),
            text("2024-01-11T00:00:00.000+0000")
        );
        assert_eq!(record.get_value("time_to_done"), Value::Int(9));
    }

    #[test]
    fn test_milestone_before_creation_is_negative() {
        let mut issue = full_issue();
        issue["changelog"] = json!({ "histories": [
            { "created": "2024-01-01T22:00:00.000+0000",
              "items": [{ "field": "status", "toString": "Done" }] }
        ]});

        let record = transform(issue);
        assert_eq!(record.get_value("time_to_done"), Value::Int(-1));
    }

    #[test]
    fn test_unparseable_created_keeps_timestamps_but_not_days() {
        let mut issue = full_issue();
        issue["fields"]["created"] = json!("sometime last week");

        let record = transform(issue);
        assert_eq!(record.get_value("created"), text("sometime last week"));
        assert_eq!(
            record.get_value("done"),
            text("2024-01-05T12:00:00.000+0000")
        );
        assert_eq!(record.get_value("time_to_done"), Value::Null);
    }

    #[test]
    fn test_outward_link_preferred_over_inward() {
        let mut issue = full_issue();
        issue["fields"]["issuelinks"] = json!([
            { "outwardIssue": { "key": "OI-2" }, "inwardIssue": { "key": "OI-3" } },
            { "inwardIssue": { "key": "OI-4" } },
            { "type": { "name": "Relates" } }
        ]);

        let record = transform(issue);
        assert_eq!(record.get_value("linked_issue_keys"), text("OI-2, OI-4"));
    }

    #[test]
    fn test_composite_field_values_become_text() {
        let mut issue = full_issue();
        issue["fields"]["customfield_12310"] = json!({ "value": { "id": 3, "name": "Acme" } });
        issue["fields"]["summary"] = json!(["first", "second"]);

        let record = transform(issue);
        assert_eq!(
            record.get_value("client_name"),
            text(r#"{"id":3,"name":"Acme"}"#)
        );
        assert_eq!(record.get_value("summary"), text("first, second"));
    }

    #[test]
    fn test_keyless_outward_link_falls_back_to_inward() {
        let mut issue = full_issue();
        issue["fields"]["issuelinks"] = json!([
            { "outwardIssue": {}, "inwardIssue": { "key": "X-1" } },
            { "outwardIssue": { "id": "10" }, "inwardIssue": { "key": "X-2" } }
        ]);

        let record = transform(issue);
        assert_eq!(record.get_value("linked_issue_keys"), text("X-1, X-2"));
    }

    #[test]
    fn test_scalar_field_values_become_text() {
        let mut issue = full_issue();
        issue["fields"]["summary"] = json!(12345);
        issue["fields"]["customfield_12310"] = json!({ "value": true });
        issue["fields"]["priority"] = json!({ "name": 1.5 });

        let record = transform(issue);
        assert_eq!(record.get_value("summary"), text("12345"));
        assert_eq!(record.get_value("client_name"), text("true"));
        assert_eq!(record.get_value("priority"), text("1.5"));
        for column in ISSUE_COLUMNS {
            let value = record.get_value(column.name);
            match column.data_type {
                DataType::Text => assert!(
                    matches!(value, Value::String(_) | Value::Null),
                    "{} = {value:?}",
                    column.name
                ),
                DataType::BigInt => assert!(
                    matches!(value, Value::Int(_) | Value::Null),
                    "{} = {value:?}",
                    column.name
                ),
            }
        }
    }

    #[test]
    fn test_components_without_names_are_skipped() {
        let mut issue = full_issue();
        issue["fields"]["components"] = json!([{ "id": "1" }, { "name": "Billing" }]);

        let record = transform(issue);
        assert_eq!(record.get_value("components"), text("Billing"));
    }
}
