//! InMemoryMetrics - カウンタとタイミングをメモリに保持する MetricsClient
//!
//! テストでの検証と CLI のサマリ表示に使います。

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

use crate::ports::MetricsClient;

#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    counters: Mutex<BTreeMap<String, i64>>,
    timings: Mutex<BTreeMap<String, Vec<Duration>>>,
}

/// ある時点の集計結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, i64>,
    /// キーごとの (件数, 合計ミリ秒)
    pub timings: BTreeMap<String, TimingSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TimingSummary {
    pub count: usize,
    pub total_ms: f64,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, key: &str) -> i64 {
        self.counters
            .lock()
            .map(|c| c.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn timings(&self, key: &str) -> Vec<Duration> {
        self.timings
            .lock()
            .map(|t| t.get(key).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self.counters.lock().map(|c| c.clone()).unwrap_or_default();
        let timings = self
            .timings
            .lock()
            .map(|t| {
                t.iter()
                    .map(|(key, samples)| {
                        let total_ms = samples.iter().map(|d| d.as_secs_f64() * 1000.0).sum();
                        let summary = TimingSummary {
                            count: samples.len(),
                            total_ms,
                        };
                        (key.clone(), summary)
                    })
                    .collect()
            })
            .unwrap_or_default();
        MetricsSnapshot { counters, timings }
    }
}

impl MetricsClient for InMemoryMetrics {
    fn inc(&self, key: &str, value: i64) {
        if let Ok(mut counters) = self.counters.lock() {
            *counters.entry(key.to_string()).or_insert(0) += value;
        }
    }

    fn timing(&self, key: &str, duration: Duration) {
        if let Ok(mut timings) = self.timings.lock() {
            timings.entry(key.to_string()).or_default().push(duration);
        }
    }
}
