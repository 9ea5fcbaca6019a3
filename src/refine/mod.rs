//! Refinement pipelines, one per source system
//!
//! Every pipeline consumes a document and hands it back only when all of its
//! steps succeeded.

pub mod cbs;
pub mod cid;
pub mod datastation;
pub mod dataverse_nl;
pub mod edit;
pub mod liss;
pub mod sicada;
pub mod title;
pub mod values;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RefinementConfig;
use crate::document::Document;
use crate::error::RefineResult;
use crate::reference::ReferenceTable;

/// Source system whose rules are applied to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pipeline {
    Cbs,
    Cid,
    Liss,
    Datastation,
    DataverseNl,
    Sicada,
}

/// Everything a pipeline may read besides the document itself
#[derive(Debug, Clone, Copy)]
pub struct RefineContext<'a> {
    pub titles: &'a ReferenceTable,
    pub config: &'a RefinementConfig,
}

impl Pipeline {
    pub const ALL: [Pipeline; 6] = [
        Pipeline::Cbs,
        Pipeline::Cid,
        Pipeline::Liss,
        Pipeline::Datastation,
        Pipeline::DataverseNl,
        Pipeline::Sicada,
    ];

    /// Route segment and log name
    pub fn name(&self) -> &'static str {
        match self {
            Pipeline::Cbs => "cbs",
            Pipeline::Cid => "cid",
            Pipeline::Liss => "liss",
            Pipeline::Datastation => "datastation",
            Pipeline::DataverseNl => "dataverse-nl",
            Pipeline::Sicada => "sicada",
        }
    }

    /// Only CBS titles are looked up in the DSC table
    pub fn uses_reference_table(&self) -> bool {
        matches!(self, Pipeline::Cbs)
    }

    pub fn refine(
        &self,
        document: Document,
        context: &RefineContext<'_>,
    ) -> RefineResult<Document> {
        let config = context.config;
        match self {
            Pipeline::Cbs => {
                cbs::refine(document, context.titles, &config.cbs, &config.dab_base_url)
            }
            Pipeline::Cid => cid::refine(document),
            Pipeline::Liss => liss::refine(document, &config.dab_base_url),
            Pipeline::Datastation => datastation::refine(document, &config.dab_base_url),
            Pipeline::DataverseNl => dataverse_nl::refine(document, &config.contacts.dataverse_nl),
            Pipeline::Sicada => sicada::refine(document, &config.contacts.sicada),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
