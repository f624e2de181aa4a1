use std::sync::Arc;

use adapter::notifier::ChannelNotifier;
use adapter::repository::booking::BookingRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::memory::{InMemoryBookingRepository, InMemoryHealthCheckRepository};
use adapter::sheet::SheetClient;
use kernel::model::{room::RoomCatalog, slot::SlotGrid};
use kernel::notifier::Notifier;
use kernel::repository::booking::BookingRepository;
use kernel::repository::health::HealthCheckRepository;
use shared::config::AppConfig;
use shared::error::AppResult;

#[derive(Clone)]
pub struct AppRegistry {
    booking_repository: Arc<dyn BookingRepository>,
    health_check_repository: Arc<dyn HealthCheckRepository>,
    notifier: Arc<dyn Notifier>,
    room_catalog: Arc<RoomCatalog>,
    slot_grid: Arc<SlotGrid>,
}

impl AppRegistry {
    /// 外部ストアサービスを使う通常構成
    pub fn new(client: SheetClient, app_config: &AppConfig) -> AppResult<Self> {
        let slot_grid = Arc::new(SlotGrid::from_config(&app_config.schedule)?);
        let booking_repository = Arc::new(BookingRepositoryImpl::new(
            client.clone(),
            slot_grid.clone(),
        ));
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(client));
        Ok(Self {
            booking_repository,
            health_check_repository,
            notifier: Arc::new(ChannelNotifier::new()),
            room_catalog: Arc::new(RoomCatalog::standard()),
            slot_grid,
        })
    }

    /// 外部サービスなしのインメモリ構成。ローカル起動とテストで使う。
    pub fn in_memory(app_config: &AppConfig) -> AppResult<Self> {
        let slot_grid = Arc::new(SlotGrid::from_config(&app_config.schedule)?);
        let booking_repository = Arc::new(InMemoryBookingRepository::new(slot_grid.clone()));
        Ok(Self {
            booking_repository,
            health_check_repository: Arc::new(InMemoryHealthCheckRepository),
            notifier: Arc::new(ChannelNotifier::new()),
            room_catalog: Arc::new(RoomCatalog::standard()),
            slot_grid,
        })
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    pub fn room_catalog(&self) -> Arc<RoomCatalog> {
        self.room_catalog.clone()
    }

    pub fn slot_grid(&self) -> Arc<SlotGrid> {
        self.slot_grid.clone()
    }
}
