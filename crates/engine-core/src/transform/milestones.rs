use model::issue::RawIssue;

const STATUS_FIELD: &str = "status";

/// Workflow statuses whose transition time is tracked per issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    WithCoreProduct,
    Done,
    PendingClose,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [
        Milestone::WithCoreProduct,
        Milestone::Done,
        Milestone::PendingClose,
    ];

    /// Matches the display label of a status transition target.
    pub fn from_status(label: &str) -> Option<Self> {
        match label {
            "With Core Product" => Some(Milestone::WithCoreProduct),
            "Done" => Some(Milestone::Done),
            "Pending Close" => Some(Milestone::PendingClose),
            _ => None,
        }
    }

    /// Column holding the raw transition timestamp.
    pub fn timestamp_column(&self) -> &'static str {
        match self {
            Milestone::WithCoreProduct => "with_core_product",
            Milestone::Done => "done",
            Milestone::PendingClose => "pending_close",
        }
    }

    /// Column holding whole days from creation to the transition.
    pub fn elapsed_column(&self) -> &'static str {
        match self {
            Milestone::WithCoreProduct => "time_to_core_product",
            Milestone::Done => "time_to_done",
            Milestone::PendingClose => "time_to_pending_close",
        }
    }
}

/// Transition timestamps found in an issue's changelog, as upstream strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneTimes {
    with_core_product: Option<String>,
    done: Option<String>,
    pending_close: Option<String>,
}

impl MilestoneTimes {
    /// Walks the changelog in upstream order. A status reached more than
    /// once keeps the timestamp of its last occurrence. Entries without a
    /// timestamp are skipped.
    pub fn scan(issue: &RawIssue) -> Self {
        let mut times = Self::default();

        for history in issue.histories() {
            let Some(created) = history.created() else {
                continue;
            };

            for item in history.items() {
                if item.field() != Some(STATUS_FIELD) {
                    continue;
                }
                if let Some(milestone) = item.to_string_value().and_then(Milestone::from_status) {
                    *times.slot_mut(milestone) = Some(created.to_string());
                }
            }
        }

        times
    }

    pub fn get(&self, milestone: Milestone) -> Option<&str> {
        match milestone {
            Milestone::WithCoreProduct => self.with_core_product.as_deref(),
            Milestone::Done => self.done.as_deref(),
            Milestone::PendingClose => self.pending_close.as_deref(),
        }
    }

    fn slot_mut(&mut self, milestone: Milestone) -> &mut Option<String> {
        match milestone {
            Milestone::WithCoreProduct => &mut self.with_core_product,
            Milestone::Done => &mut self.done,
            Milestone::PendingClose => &mut self.pending_close,
        }
    }
}
