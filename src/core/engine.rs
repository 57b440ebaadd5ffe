use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct NormalizeEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> NormalizeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting place normalization...");

        tracing::info!("Extracting place records...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());
        self.monitor.log_stats("Extract");

        tracing::info!("Normalizing records...");
        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Normalized {} records ({} skipped)",
            result.normalized.len(),
            result.skipped.len()
        );
        self.monitor.log_stats("Transform");

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NormalizeResult, PlaceDetails};
    use crate::utils::error::PlacekitError;
    use async_trait::async_trait;

    struct StubPipeline {
        fail_extract: bool,
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<PlaceDetails>> {
            if self.fail_extract {
                return Err(PlacekitError::ProcessingError {
                    message: "boom".to_string(),
                });
            }
            Ok(vec![PlaceDetails {
                formatted_address: Some("London, UK".to_string()),
                ..Default::default()
            }])
        }

        async fn transform(&self, data: Vec<PlaceDetails>) -> Result<NormalizeResult> {
            Ok(NormalizeResult {
                normalized: data
                    .iter()
                    .filter_map(|record| crate::core::normalize::canonicalize(record, false))
                    .collect(),
                skipped: vec![],
                json_output: "{}".to_string(),
                csv_output: String::new(),
            })
        }

        async fn load(&self, _result: NormalizeResult) -> Result<String> {
            Ok("stub_output/places.json".to_string())
        }
    }

    #[test]
    fn test_engine_runs_all_phases() {
        let engine = NormalizeEngine::new(StubPipeline {
            fail_extract: false,
        });

        let output_path = tokio_test::block_on(engine.run()).unwrap();
        assert_eq!(output_path, "stub_output/places.json");
    }

    #[test]
    fn test_engine_propagates_phase_errors() {
        let engine = NormalizeEngine::new(StubPipeline { fail_extract: true });

        let result = tokio_test::block_on(engine.run());
        assert!(matches!(result, Err(PlacekitError::ProcessingError { .. })));
    }
}
