use async_trait::async_trait;
use chrono::NaiveDate;
use holical::domain::entities::{CountryCode, HolidayRecord, Year};
use holical::domain::errors::{SourceError, SourceResult};
use holical::domain::ports::HolidaySource;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Test double for an external source that counts how often it is consulted
pub struct StubSource {
    name: &'static str,
    records: Option<Vec<HolidayRecord>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubSource {
    /// A source whose every request fails like an unreachable upstream
    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            records: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    /// A source that answers only after `delay`, like a stalled upstream
    pub fn slow(name: &'static str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            name,
            records: None,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn returning(name: &'static str, records: Vec<HolidayRecord>) -> Arc<Self> {
        Arc::new(Self {
            name,
            records: Some(records),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HolidaySource for StubSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(&self, _: &CountryCode, _: Year) -> SourceResult<Vec<HolidayRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.records {
            Some(records) => Ok(records.clone()),
            None => Err(SourceError::Http("connection refused".to_string())),
        }
    }
}

pub fn as_source(stub: &Arc<StubSource>) -> Arc<dyn HolidaySource> {
    stub.clone()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
