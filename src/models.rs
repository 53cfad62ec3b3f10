use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const ITEM_NAME: &str = "Item Name";
pub const ITEM_GROUP_LABEL: &str = "Item Group Label";
pub const FORM_LABEL: &str = "Form Label";
pub const FORM_NAME: &str = "Form Name";
pub const ITEM_GROUP_NAME: &str = "Item Group Name";

/// Columns excluded from every comparison regardless of dataset.
pub const IGNORED_COLUMNS: [&str; 2] = ["Definition Last Modified", "Relationship Last Modified"];

/// One record: an ordered mapping from column name to an optional scalar.
/// `None` is a blank cell; a column missing from the map entirely means the
/// dataset never had that column.
pub type Row = IndexMap<String, Option<String>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Appends a row by zipping `values` against the column list. Short rows
    /// are padded with blanks; extra values are dropped.
    pub fn push_row(&mut self, mut values: Vec<Option<String>>) {
        values.resize(self.columns.len(), None);
        let row: Row = self.columns.iter().cloned().zip(values).collect();
        self.rows.push(row);
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Distinct non-blank values of `column` in dataset order.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            if let Some(Some(v)) = row.get(column) {
                if seen.insert(v.clone()) {
                    out.push(v.clone());
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Match,
    Mismatch,
    MissingSource,
    MissingTarget,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
            Self::MissingSource => "missing_source",
            Self::MissingTarget => "missing_target",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Match => "\u{2713}",
            Self::Mismatch => "\u{2717}",
            Self::MissingSource | Self::MissingTarget => "\u{26a0}",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which key located the row pair for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchedBy {
    ItemName,
    ItemGroupLabel,
    FormLabel,
    None,
}

impl MatchedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ItemName => ITEM_NAME,
            Self::ItemGroupLabel => ITEM_GROUP_LABEL,
            Self::FormLabel => FORM_LABEL,
            Self::None => "",
        }
    }
}

/// One compared (item, column) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRecord {
    pub column: String,
    pub source_value: Option<String>,
    pub target_value: Option<String>,
    /// False when the column does not exist in the target dataset at all,
    /// as opposed to a blank cell in a column the target does have.
    pub target_in_schema: bool,
    pub status: MatchStatus,
    pub symbol: &'static str,
    pub note: String,
}

/// All comparison records for one item, plus where its rows came from.
#[derive(Debug, Clone, Serialize)]
pub struct ItemComparison {
    pub item: String,
    pub matched_by: MatchedBy,
    pub in_source: bool,
    pub in_target: bool,
    /// The source row the comparison was built from; issue rows pull their
    /// form/group context columns out of it.
    pub source_row: Option<Row>,
    pub records: Vec<ComparisonRecord>,
}

/// Per-item counts, derived from an ItemComparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub item: String,
    pub matched_by: MatchedBy,
    pub in_source: bool,
    pub in_target: bool,
    pub total: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub missing_source: usize,
    pub missing_target: usize,
    pub match_pct: f64,
}

/// One row of the filtered issues table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRow {
    pub item: String,
    pub form_name: String,
    pub form_label: String,
    pub item_group_name: String,
    pub item_group_label: String,
    pub column: String,
    pub source_value: String,
    pub target_value: String,
    pub status: MatchStatus,
    pub issue_type: String,
}

/// Which dataset supplies the column basis (source) vs the one checked
/// against it (target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    PtdToSds,
    SdsToPtd,
    SdsToSds,
}

impl Direction {
    /// Display labels spliced into notes, headers and sheet content.
    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::PtdToSds => ("PTD", "SDS"),
            Self::SdsToPtd => ("SDS", "PTD"),
            Self::SdsToSds => ("SDS A", "SDS B"),
        }
    }
}

/// Input role: PTD sheets carry a leading title row and get the
/// trial-inclusion preprocessing; SDS inputs are used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Ptd,
    Sds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// One sheet per compared item (legacy bulk/multi-select layout).
    Items,
    /// Single consolidated "Issues Only" sheet.
    Issues,
}
