use crate::dashboard::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_CONSTITUENCY_COLUMN: &str = "Constituency";
pub const DEFAULT_CANDIDATE_COLUMN: &str = "Candidate";
pub const DEFAULT_PARTY_COLUMN: &str = "Party";
pub const DEFAULT_VOTES_COLUMN: &str = "Total Votes";

pub const DEFAULT_DASHBOARD_NAME: &str = "Andhra Pradesh Elections 2024";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "dashboardName")]
    pub dashboard_name: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "exportConstituency")]
    pub export_constituency: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "constituencyColumn")]
    pub constituency_column: Option<String>,
    #[serde(rename = "candidateColumn")]
    pub candidate_column: Option<String>,
    #[serde(rename = "partyColumn")]
    pub party_column: Option<String>,
    #[serde(rename = "votesColumn")]
    pub votes_column: Option<String>,
}

impl DataSource {
    pub fn columns(&self) -> Columns {
        Columns {
            constituency: self
                .constituency_column
                .clone()
                .unwrap_or_else(|| DEFAULT_CONSTITUENCY_COLUMN.to_string()),
            candidate: self
                .candidate_column
                .clone()
                .unwrap_or_else(|| DEFAULT_CANDIDATE_COLUMN.to_string()),
            party: self
                .party_column
                .clone()
                .unwrap_or_else(|| DEFAULT_PARTY_COLUMN.to_string()),
            votes: self
                .votes_column
                .clone()
                .unwrap_or_else(|| DEFAULT_VOTES_COLUMN.to_string()),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PartyConfig {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selection {
    pub party: Option<String>,
    pub constituency: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "dataSource", default)]
    pub data_source: DataSource,
    /// The known parties. When empty, the parties of the 2024 election are used.
    #[serde(default)]
    pub parties: Vec<PartyConfig>,
    #[serde(default)]
    pub selection: Selection,
}

impl DashboardConfig {
    pub fn known_parties(&self) -> Vec<Party> {
        if self.parties.is_empty() {
            return default_parties();
        }
        self.parties
            .iter()
            .map(|p| Party {
                name: p.name.clone(),
                color: match p.color.clone() {
                    Some(x) if !x.is_empty() => x,
                    // Grey for the parties without an assigned colour.
                    _ => "#808080".to_string(),
                },
            })
            .collect()
    }
}

/// The names of the columns holding the fields of a result row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Columns {
    pub constituency: String,
    pub candidate: String,
    pub party: String,
    pub votes: String,
}

impl Default for Columns {
    fn default() -> Self {
        DataSource::default().columns()
    }
}

pub fn read_config(path: &str) -> DashboardResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Reads a reference summary.
pub fn read_summary(path: &str) -> DashboardResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
