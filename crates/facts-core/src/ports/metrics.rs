//! MetricsClient port - メトリクス送信先の抽象化
//!
//! 送信先（StatsD, Prometheus など）はこのクレートの外側にあり、
//! ここでは MetricsDecorator が使う最小限の契約だけを定義します。

use std::time::Duration;

/// MetricsClient はカウンタとタイミングを記録
///
/// キーはドット区切り（例: `commands.create_fact.success`）。
pub trait MetricsClient: Send + Sync {
    fn inc(&self, key: &str, value: i64);

    fn timing(&self, key: &str, duration: Duration);
}

/// 何も記録しない MetricsClient
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsClient for NoopMetrics {
    fn inc(&self, _key: &str, _value: i64) {}

    fn timing(&self, _key: &str, _duration: Duration) {}
}
