use crate::sheet::model::BookingRow;
use anyhow::Context;
use chrono::NaiveDate;
use kernel::model::{
    booking::{Booking, BookingStatus},
    id::BookingId,
};
use reqwest::StatusCode;
use shared::{
    config::StoreConfig,
    error::{AppError, AppResult},
};
use std::time::Duration;

pub mod model;

/// 外部のスプレッドシート型ストアサービスへの HTTP クライアント。
/// 永続化の責務はすべてこのサービス側にあり、ここは行単位の
/// 読み書きだけを仲介する。
#[derive(Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    base_url: String,
    sheet_id: String,
}

impl SheetClient {
    pub fn new(cfg: &StoreConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("failed to build store http client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            sheet_id: cfg.sheet_id.clone(),
        })
    }

    fn rows_url(&self) -> String {
        format!("{}/v1/sheets/{}/bookings", self.base_url, self.sheet_id)
    }

    pub async fn fetch_rows(&self, date: Option<NaiveDate>) -> AppResult<Vec<Booking>> {
        let mut req = self.http.get(self.rows_url());
        if let Some(date) = date {
            req = req.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }
        let res = req
            .send()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        if !res.status().is_success() {
            return Err(AppError::StoreUnavailable(format!(
                "list returned {}",
                res.status()
            )));
        }
        let rows: Vec<BookingRow> = res
            .json()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    pub async fn fetch_row(&self, booking_id: BookingId) -> AppResult<Booking> {
        let res = self
            .http
            .get(format!("{}/{}", self.rows_url(), booking_id))
            .send()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        match res.status() {
            StatusCode::NOT_FOUND => Err(AppError::EntityNotFound(format!(
                "booking not found: {booking_id}"
            ))),
            s if s.is_success() => {
                let row: BookingRow = res
                    .json()
                    .await
                    .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
                Ok(row.into())
            }
            s => Err(AppError::StoreUnavailable(format!("get returned {s}"))),
        }
    }

    /// 行の追加。ストアは書き込み時点の重複予約を拒否する契約
    /// （楽観的並行性制御）で、409 はそのまま SlotConflict として返す。
    pub async fn append_row(&self, booking: &Booking) -> AppResult<()> {
        let row = BookingRow::from(booking);
        let res = self
            .http
            .post(self.rows_url())
            .json(&row)
            .send()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        match res.status() {
            StatusCode::CONFLICT => Err(AppError::SlotConflict(format!(
                "room {} {} - {} on {}",
                booking.room_id,
                kernel::model::slot::format_time(booking.slot.start),
                kernel::model::slot::format_time(booking.slot.end),
                booking.date
            ))),
            s if s.is_success() => Ok(()),
            s => Err(AppError::StoreUnavailable(format!("append returned {s}"))),
        }
    }

    pub async fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> AppResult<()> {
        let res = self
            .http
            .patch(format!("{}/{}", self.rows_url(), booking_id))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        match res.status() {
            StatusCode::NOT_FOUND => Err(AppError::EntityNotFound(format!(
                "booking not found: {booking_id}"
            ))),
            s if s.is_success() => Ok(()),
            s => Err(AppError::StoreUnavailable(format!("update returned {s}"))),
        }
    }

    pub async fn ping(&self) -> bool {
        let url = format!("{}/healthz", self.base_url);
        match self.http.get(url).send().await {
            Ok(res) => res.status().is_success(),
            Err(_) => false,
        }
    }
}
