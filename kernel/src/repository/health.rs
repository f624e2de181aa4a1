use async_trait::async_trait;

#[async_trait]
pub trait HealthCheckRepository: Send + Sync {
    /// 外部ストアサービスへ到達できるか
    async fn check_store(&self) -> bool;
}
