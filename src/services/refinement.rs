//! Refinement service: loads the reference table and runs pipelines

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;

use crate::{
    config::{ReferenceTableConfig, RefinementConfig},
    document::Document,
    error::{AppError, AppResult, ReferenceTableError},
    reference::ReferenceTable,
    refine::{Pipeline, RefineContext},
};

#[derive(Clone)]
pub struct RefinementService {
    config: Arc<RefinementConfig>,
    titles: Arc<OnceCell<Arc<ReferenceTable>>>,
}

impl RefinementService {
    pub fn new(config: RefinementConfig) -> Self {
        Self {
            config: Arc::new(config),
            titles: Arc::new(OnceCell::new()),
        }
    }

    /// Service that uses `table` instead of reading the configured file
    pub fn with_reference_table(config: RefinementConfig, table: ReferenceTable) -> Self {
        Self {
            config: Arc::new(config),
            titles: Arc::new(OnceCell::from(Arc::new(table))),
        }
    }

    /// Loads the reference table ahead of the first CBS request when caching
    /// is enabled
    pub async fn preload(&self) -> AppResult<()> {
        if self.config.reference_table.cache {
            self.reference_table().await?;
        }
        Ok(())
    }

    /// Refine `metadata` with `pipeline`.
    ///
    /// An array is refined element by element; one failing element fails the
    /// whole request.
    pub async fn refine(&self, pipeline: Pipeline, metadata: Value) -> AppResult<Value> {
        tracing::debug!("Refinement started: pipeline={}", pipeline);

        let result = self.run(pipeline, metadata).await;
        match &result {
            Ok(_) => tracing::debug!("Refinement completed: pipeline={}", pipeline),
            Err(e) if e.is_client_error() => {
                tracing::warn!("Refinement rejected: pipeline={}: {}", pipeline, e)
            }
            Err(e) => tracing::error!("Refinement failed: pipeline={}: {}", pipeline, e),
        }
        result
    }

    async fn run(&self, pipeline: Pipeline, metadata: Value) -> AppResult<Value> {
        let titles = if pipeline.uses_reference_table() {
            self.reference_table().await?
        } else {
            Arc::default()
        };
        let context = RefineContext {
            titles: &titles,
            config: &self.config,
        };

        match metadata {
            Value::Object(_) => Ok(pipeline.refine(metadata, &context)?),
            Value::Array(documents) => {
                tracing::debug!("Refining {} documents with {}", documents.len(), pipeline);
                let refined = documents
                    .into_iter()
                    .map(|document| refine_document(pipeline, document, &context))
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Value::Array(refined))
            }
            _ => Err(AppError::BadRequest(
                "metadata must be a dataset document or a list of documents".to_string(),
            )),
        }
    }

    async fn reference_table(&self) -> Result<Arc<ReferenceTable>, ReferenceTableError> {
        if let Some(table) = self.titles.get() {
            return Ok(table.clone());
        }

        let settings = &self.config.reference_table;
        if settings.cache {
            self.titles
                .get_or_try_init(|| load_reference_table(settings.clone()))
                .await
                .cloned()
        } else {
            load_reference_table(settings.clone()).await
        }
    }
}

fn refine_document(
    pipeline: Pipeline,
    document: Document,
    context: &RefineContext<'_>,
) -> AppResult<Document> {
    if !document.is_object() {
        return Err(AppError::BadRequest(
            "every element of metadata must be a dataset document".to_string(),
        ));
    }
    Ok(pipeline.refine(document, context)?)
}

async fn load_reference_table(
    settings: ReferenceTableConfig,
) -> Result<Arc<ReferenceTable>, ReferenceTableError> {
    let path = settings.path.clone();
    let delimiter = settings.delimiter_byte();

    let table = tokio::task::spawn_blocking(move || ReferenceTable::load(&path, delimiter))
        .await??;

    tracing::info!("Loaded reference table {} ({} titles)", settings.path, table.len());
    Ok(Arc::new(table))
}
