use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub methods: Vec<&'static str>,
}

/// One entry of the Netflix titles dataset used for seeding.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatasetEntry {
    pub show_id: Option<i64>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
    pub description: Option<String>,
}
