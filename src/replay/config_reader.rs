use crate::replay::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LayoutCategory {
    pub key: String,
    #[serde(rename = "categoryId")]
    pub category_id: u32,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "maxPreferentials")]
    pub max_preferentials: u32,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BallotLayout {
    pub categories: Vec<LayoutCategory>,
}

impl BallotLayout {
    pub fn build(&self) -> BCResult<BallotState> {
        let mut builder = builder::Builder::new();
        for lc in self.categories.iter() {
            let key = lc.key.parse::<CategoryKey>().context(InvalidLayoutSnafu {})?;
            builder = builder
                .category(
                    key,
                    lc.category_id,
                    lc.display_name.as_str(),
                    lc.max_preferentials,
                )
                .context(InvalidLayoutSnafu {})?;
        }
        builder.build().context(InvalidLayoutSnafu {})
    }
}

// The field names of the candidates follow the form layer.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSelection {
    pub numero: u32,
    pub id_partido: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub category: String,
    pub party: Option<String>,
    #[serde(default)]
    pub candidates: Vec<CandidateSelection>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SelectionFile {
    pub selections: Vec<Selection>,
}
