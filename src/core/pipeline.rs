use crate::core::normalize;
use crate::core::{ConfigProvider, NormalizeResult, Pipeline, PlaceDetails, Storage};
use crate::domain::model::{OutputEnvelope, SearchResponse};
use crate::utils::error::{PlacekitError, Result};
use chrono::Utc;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub struct PlacePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PlacePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PlacePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<PlaceDetails>> {
        tracing::debug!("Reading place data from: {}", self.config.input_path());
        let content = std::fs::read_to_string(self.config.input_path())?;
        let json_data: serde_json::Value = serde_json::from_str(&content)?;

        // Accepted payload shapes: a bare array of detail records, a single
        // record object, or the search envelope {"places": [...]}.
        let is_search_envelope = json_data
            .as_object()
            .map(|map| map.contains_key("places"))
            .unwrap_or(false);

        let mut records: Vec<PlaceDetails> = if is_search_envelope {
            let response: SearchResponse = serde_json::from_value(json_data)?;
            response.places.into_iter().map(PlaceDetails::from).collect()
        } else {
            match json_data {
                serde_json::Value::Array(items) => {
                    let mut records = Vec::with_capacity(items.len());
                    for item in items {
                        records.push(serde_json::from_value(item)?);
                    }
                    records
                }
                other => vec![serde_json::from_value(other)?],
            }
        };

        if let Some(max_records) = self.config.max_records() {
            if records.len() > max_records {
                tracing::debug!(
                    "Keeping {} of {} records (max_records)",
                    max_records,
                    records.len()
                );
                records.truncate(max_records);
            }
        }

        if records.is_empty() {
            tracing::warn!("No place records found in input");
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<PlaceDetails>) -> Result<NormalizeResult> {
        let mut normalized = Vec::new();
        let mut skipped = Vec::new();
        let prefer_legacy = self.config.prefer_legacy();

        for record in data {
            match normalize::canonicalize(&record, prefer_legacy) {
                Some(place) => normalized.push(place),
                None => {
                    if self.config.strict() {
                        return Err(PlacekitError::ProcessingError {
                            message: "Record carries neither legacy nor structured place fields"
                                .to_string(),
                        });
                    }
                    tracing::warn!("Skipping record with no recognizable place fields");
                    skipped.push(record);
                }
            }
        }

        let envelope = OutputEnvelope {
            generated_at: Utc::now(),
            count: normalized.len(),
            skipped: skipped.len(),
            places: normalized.clone(),
        };
        let json_output = serde_json::to_string_pretty(&envelope)?;

        let mut csv_lines =
            vec!["display_name,formatted_address,lat,lng,source_format".to_string()];
        for place in &normalized {
            let (lat, lng) = match &place.location {
                Some(location) => (location.lat.to_string(), location.lng.to_string()),
                None => (String::new(), String::new()),
            };
            csv_lines.push(format!(
                "{},{},{},{},{}",
                csv_field(place.display_name.as_deref().unwrap_or("")),
                csv_field(place.formatted_address.as_deref().unwrap_or("")),
                lat,
                lng,
                place.source_format.as_str()
            ));
        }

        Ok(NormalizeResult {
            normalized,
            skipped,
            json_output,
            csv_output: csv_lines.join("\n"),
        })
    }

    async fn load(&self, result: NormalizeResult) -> Result<String> {
        let formats = self.config.output_formats();
        let want_json = formats.iter().any(|format| format == "json");
        let want_csv = formats.iter().any(|format| format == "csv");

        if self.config.compression() {
            tracing::debug!("Creating ZIP archive");

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                if want_json {
                    zip.start_file::<_, ()>("places.json", FileOptions::default())?;
                    zip.write_all(result.json_output.as_bytes())?;
                }

                if want_csv {
                    zip.start_file::<_, ()>("places.csv", FileOptions::default())?;
                    zip.write_all(result.csv_output.as_bytes())?;
                }

                if !result.skipped.is_empty() {
                    zip.start_file::<_, ()>("skipped.json", FileOptions::default())?;
                    let json_data = serde_json::to_string_pretty(&result.skipped)?;
                    zip.write_all(json_data.as_bytes())?;
                }

                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing ZIP archive ({} bytes) to storage", zip_data.len());
            self.storage.write_file("places_output.zip", &zip_data).await?;

            return Ok(format!("{}/places_output.zip", self.config.output_path()));
        }

        let mut primary = None;

        if want_json {
            self.storage
                .write_file("places.json", result.json_output.as_bytes())
                .await?;
            primary.get_or_insert(format!("{}/places.json", self.config.output_path()));
        }

        if want_csv {
            self.storage
                .write_file("places.csv", result.csv_output.as_bytes())
                .await?;
            primary.get_or_insert(format!("{}/places.csv", self.config.output_path()));
        }

        if !result.skipped.is_empty() {
            let json_data = serde_json::to_string_pretty(&result.skipped)?;
            self.storage
                .write_file("skipped.json", json_data.as_bytes())
                .await?;
        }

        Ok(primary.unwrap_or_else(|| self.config.output_path().to_string()))
    }
}
