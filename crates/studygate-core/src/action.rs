//! Gated user actions and their capability categories.
//!
//! [`StudyAction`] is the closed set of operations the portal gates against
//! access-controlled studies. [`StudyAction::category`] maps every action to
//! exactly one [`ActionCategory`], one of the five capability booleans
//! carried by a per-dataset permission entry. The mapping is total and
//! static.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user-initiated operation against a study, subject to authorization.
///
/// Wire names are camelCase (`recordPage`, `downloadPage`) to match the
/// portal's JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudyAction {
    /// Run a search against the study's data.
    Search,
    /// Create and view analyses.
    Analysis,
    /// View search results.
    Results,
    /// Page past the first screen of results.
    Paginate,
    /// Open a single record from a result list.
    Record,
    /// Visit a record page directly.
    RecordPage,
    /// Download a page of search results.
    DownloadPage,
    /// Bulk-download study data.
    Download,
    /// Add search results to the basket.
    Basket,
}

impl StudyAction {
    /// Every action, in declaration order.
    pub const ALL: [StudyAction; 9] = [
        Self::Search,
        Self::Analysis,
        Self::Results,
        Self::Paginate,
        Self::Record,
        Self::RecordPage,
        Self::DownloadPage,
        Self::Download,
        Self::Basket,
    ];

    /// The capability category gating this action.
    ///
    /// Total by construction: a permission entry authorizes an action iff
    /// the boolean selected by this category is set.
    #[must_use]
    pub const fn category(self) -> ActionCategory {
        match self {
            Self::Search => ActionCategory::Subsetting,
            Self::Analysis => ActionCategory::Visualizations,
            Self::Results | Self::Record | Self::DownloadPage => ActionCategory::ResultsFirstPage,
            Self::Paginate | Self::Download | Self::Basket => ActionCategory::ResultsAll,
            Self::RecordPage => ActionCategory::StudyMetadata,
        }
    }

    /// Whether restricting this action blocks navigation.
    ///
    /// A restricted strict action directs the user back or home; a
    /// restricted non-strict action shows a dismissible notice.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(
            self,
            Self::Search | Self::Analysis | Self::Results | Self::RecordPage | Self::DownloadPage
        )
    }

    /// User-facing phrase for this action, completing sentences of the form
    /// "Please acquire research approval in order to {verb}."
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Search => "search the data",
            Self::Analysis => "create and view analyses",
            Self::Results => "view search results",
            Self::Paginate => "see more than 25 results",
            Self::Record | Self::RecordPage => "access a record page",
            Self::DownloadPage => "download a search result",
            Self::Download => "download data",
            Self::Basket => "add to your basket",
        }
    }

    /// Wire/log label for this action.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Analysis => "analysis",
            Self::Results => "results",
            Self::Paginate => "paginate",
            Self::Record => "record",
            Self::RecordPage => "recordPage",
            Self::DownloadPage => "downloadPage",
            Self::Download => "download",
            Self::Basket => "basket",
        }
    }
}

impl fmt::Display for StudyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the five named capabilities a permission entry grants per dataset.
///
/// Wire names are camelCase (`studyMetadata`, `resultsFirstPage`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionCategory {
    /// View study metadata.
    StudyMetadata,
    /// Subset the study's data.
    Subsetting,
    /// Create and view visualizations.
    Visualizations,
    /// View the first page of results.
    ResultsFirstPage,
    /// View all results.
    ResultsAll,
}

impl ActionCategory {
    /// Every category, in declaration order.
    pub const ALL: [ActionCategory; 5] = [
        Self::StudyMetadata,
        Self::Subsetting,
        Self::Visualizations,
        Self::ResultsFirstPage,
        Self::ResultsAll,
    ];

    /// Wire/log label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StudyMetadata => "studyMetadata",
            Self::Subsetting => "subsetting",
            Self::Visualizations => "visualizations",
            Self::ResultsFirstPage => "resultsFirstPage",
            Self::ResultsAll => "resultsAll",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
