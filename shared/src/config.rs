use anyhow::Result;
use std::env;

/// アプリケーション全体の設定。起動時に一度だけ環境変数から構築し、
/// 以降は不変のまま各層へ明示的に渡す。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub schedule: ScheduleConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let server = ServerConfig {
            port: env_or("PORT", 5000)?,
        };
        let store = StoreConfig {
            base_url: env::var("STORE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9000".into()),
            sheet_id: env::var("STORE_SHEET_ID").unwrap_or_else(|_| "bookings".into()),
            timeout_secs: env_or("STORE_TIMEOUT_SECS", 10)?,
        };
        let schedule = ScheduleConfig {
            open: env::var("SCHEDULE_OPEN").unwrap_or_else(|_| "09:00".into()),
            close: env::var("SCHEDULE_CLOSE").unwrap_or_else(|_| "17:00".into()),
            slot_minutes: env_or("SCHEDULE_SLOT_MINUTES", 30)?,
        };
        let cors = CorsConfig {
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
        };
        Ok(Self {
            server,
            store,
            schedule,
            cors,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// 外部のスプレッドシート型ストアサービスへの接続設定
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub sheet_id: String,
    pub timeout_secs: u64,
}

/// 営業日のスロットグリッド設定（既定は 09:00–17:00 の 30 分刻み）
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub open: String,
    pub close: String,
    pub slot_minutes: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// 空の場合はすべてのオリジンを許可する
    pub allowed_origins: Vec<String>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(v) => Ok(v.parse::<T>()?),
    }
}
