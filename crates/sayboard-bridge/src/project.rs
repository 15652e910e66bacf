use serde::{Deserialize, Serialize};

/// A project groups audio records under a URL-safe slug.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub last_updated: String,
    /// Server link to the project's records page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audiorecords: Option<String>,
}

/// Body of a project creation request. An empty slug lets the server derive
/// one from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub name: String,
    pub slug: String,
}
