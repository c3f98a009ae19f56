//! Request metrics
//!
//! A single lock guards the aggregate so a snapshot never observes a
//! half-recorded request. Requests are measured with a [`RequestTimer`]
//! guard that records exactly once, either through [`RequestTimer::complete`]
//! or when dropped.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tooling::logging::format_duration;
use tracing::info;

/// Samples kept per rolling window
pub const WINDOW_SIZE: usize = 100;
const RECENT_SAMPLES: usize = 10;
const TOP_USERS: usize = 5;

/// One finished request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSample {
    pub user_id: String,
    pub language: String,
    pub response_time: Duration,
    pub generation_time: Duration,
    pub translation_time: Duration,
    pub error: bool,
}

impl RequestSample {
    pub fn new(user_id: impl Into<String>, language: impl Into<String>, response_time: Duration) -> Self {
        Self {
            user_id: user_id.into(),
            language: language.into(),
            response_time,
            generation_time: Duration::ZERO,
            translation_time: Duration::ZERO,
            error: false,
        }
    }

    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }
}

/// Aggregate statistics as served by `GET /metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub unique_users: usize,
    /// Seconds, over the last [`WINDOW_SIZE`] requests
    pub average_response_time: f64,
    pub average_translation_time: f64,
    pub average_ai_time: f64,
    pub requests_last_hour: u64,
    pub error_count: u64,
    /// Percentage of all requests
    pub error_rate: f64,
    pub language_usage: BTreeMap<String, u64>,
    /// `[user, count]` pairs, busiest first
    pub top_users: Vec<(String, u64)>,
    pub uptime: String,
    pub uptime_seconds: u64,
    pub start_time: String,
    pub recent_response_times: Vec<f64>,
}

#[derive(Debug, Default)]
struct Window {
    samples: VecDeque<f64>,
}

impl Window {
    fn push(&mut self, seconds: f64) {
        if self.samples.len() == WINDOW_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(seconds);
    }

    fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    fn recent(&self, n: usize) -> Vec<f64> {
        let skip = self.samples.len().saturating_sub(n);
        self.samples.iter().skip(skip).copied().collect()
    }
}

#[derive(Debug)]
struct BotMetrics {
    total_requests: u64,
    users: HashSet<String>,
    requests_per_user: HashMap<String, u64>,
    requests_per_hour: HashMap<String, u64>,
    language_usage: BTreeMap<String, u64>,
    response_times: Window,
    translation_times: Window,
    generation_times: Window,
    error_count: u64,
    start_time: DateTime<Utc>,
}

impl BotMetrics {
    fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            total_requests: 0,
            users: HashSet::new(),
            requests_per_user: HashMap::new(),
            requests_per_hour: HashMap::new(),
            language_usage: BTreeMap::new(),
            response_times: Window::default(),
            translation_times: Window::default(),
            generation_times: Window::default(),
            error_count: 0,
            start_time,
        }
    }

    fn record(&mut self, sample: &RequestSample, now: DateTime<Utc>) {
        self.total_requests += 1;
        self.users.insert(sample.user_id.clone());
        *self.requests_per_user.entry(sample.user_id.clone()).or_default() += 1;
        *self.requests_per_hour.entry(hour_key(now)).or_default() += 1;
        *self.language_usage.entry(sample.language.clone()).or_default() += 1;

        self.response_times.push(sample.response_time.as_secs_f64());
        if !sample.translation_time.is_zero() {
            self.translation_times.push(sample.translation_time.as_secs_f64());
        }
        if !sample.generation_time.is_zero() {
            self.generation_times.push(sample.generation_time.as_secs_f64());
        }
        if sample.error {
            self.error_count += 1;
        }
    }

    fn top_users(&self, limit: usize) -> Vec<(String, u64)> {
        let mut users: Vec<_> = self
            .requests_per_user
            .iter()
            .map(|(user, count)| (user.clone(), *count))
            .collect();
        users.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        users.truncate(limit);
        users
    }

    fn snapshot(&self, now: DateTime<Utc>) -> MetricsSnapshot {
        let uptime_seconds = (now - self.start_time).num_seconds().max(0) as u64;
        let error_rate = if self.total_requests > 0 {
            self.error_count as f64 / self.total_requests as f64 * 100.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_requests: self.total_requests,
            unique_users: self.users.len(),
            average_response_time: round2(self.response_times.average()),
            average_translation_time: round2(self.translation_times.average()),
            average_ai_time: round2(self.generation_times.average()),
            requests_last_hour: self.requests_per_hour.get(&hour_key(now)).copied().unwrap_or(0),
            error_count: self.error_count,
            error_rate: round2(error_rate),
            language_usage: self.language_usage.clone(),
            top_users: self.top_users(TOP_USERS),
            uptime: format_uptime(uptime_seconds),
            uptime_seconds,
            start_time: self.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            recent_response_times: self.response_times.recent(RECENT_SAMPLES),
        }
    }
}

fn hour_key(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:00").to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `H:MM:SS`, prefixed with `N day(s), ` past the first day
pub fn format_uptime(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let rest = total_seconds % 86_400;
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);
    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}

/// Shared handle to the aggregate request statistics
#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    inner: Arc<Mutex<BotMetrics>>,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BotMetrics::new(Utc::now()))),
        }
    }

    /// Start timing one request
    pub fn start_request(&self, user_id: impl Into<String>, language: impl Into<String>) -> RequestTimer {
        RequestTimer {
            recorder: self.clone(),
            user_id: user_id.into(),
            language: language.into(),
            started: Instant::now(),
            generation_time: Duration::ZERO,
            translation_time: Duration::ZERO,
            error: false,
            recorded: false,
        }
    }

    pub fn record(&self, sample: RequestSample) {
        self.record_at(&sample, Utc::now());
    }

    fn record_at(&self, sample: &RequestSample, now: DateTime<Utc>) {
        self.inner.lock().record(sample, now);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().snapshot(Utc::now())
    }

    /// Replace the aggregate with a fresh one, restarting uptime
    pub fn reset(&self) {
        *self.inner.lock() = BotMetrics::new(Utc::now());
        info!("Metrics reset");
    }
}

/// Measures one request and records it exactly once
///
/// Dropping the timer without calling [`complete`](Self::complete) records
/// the request as an error.
#[derive(Debug)]
pub struct RequestTimer {
    recorder: MetricsRecorder,
    user_id: String,
    language: String,
    started: Instant,
    generation_time: Duration,
    translation_time: Duration,
    error: bool,
    recorded: bool,
}

impl RequestTimer {
    pub fn set_generation_time(&mut self, duration: Duration) {
        self.generation_time = duration;
    }

    pub fn set_translation_time(&mut self, duration: Duration) {
        self.translation_time = duration;
    }

    pub fn mark_error(&mut self) {
        self.error = true;
    }

    /// Record the request with the flags set so far
    pub fn complete(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.recorded {
            return;
        }
        self.recorded = true;

        let sample = RequestSample {
            user_id: std::mem::take(&mut self.user_id),
            language: std::mem::take(&mut self.language),
            response_time: self.started.elapsed(),
            generation_time: self.generation_time,
            translation_time: self.translation_time,
            error: self.error,
        };
        info!(
            user = %sample.user_id,
            language = %sample.language,
            duration = %format_duration(sample.response_time),
            ai = %format_duration(sample.generation_time),
            translation = %format_duration(sample.translation_time),
            error = sample.error,
            "Request completed"
        );
        self.recorder.record(sample);
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        if !self.recorded {
            self.error = true;
            self.finish();
        }
    }
}
