use crate::domain::model::{NormalizeResult, PlaceDetails};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn max_records(&self) -> Option<usize>;
    fn prefer_legacy(&self) -> bool;
    fn strict(&self) -> bool;
    fn compression(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PlaceDetails>>;
    async fn transform(&self, data: Vec<PlaceDetails>) -> Result<NormalizeResult>;
    async fn load(&self, result: NormalizeResult) -> Result<String>;
}
