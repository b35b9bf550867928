use std::collections::BTreeMap;
use std::time::Instant;

/// Cross-cutting logger for capture session events.
///
/// Decouples the session from specific output mechanisms so a CLI, a GUI
/// or a test can observe cycles without changing the orchestration code.
pub trait SessionLogger: Send {
    /// A capture cycle finished assigning markers.
    fn cycle(&mut self, cycle: u64);

    /// Record how long a named stage took (`detect`, `assign`, `classify`).
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces per cycle).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn cycle(&mut self, _cycle: u64) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger that keeps per-stage timings and per-cycle metrics and reports
/// averages through the `log` facade when the session ends.
pub struct StdoutSessionLogger {
    stage_ms: BTreeMap<String, Vec<f64>>,
    counters: BTreeMap<String, Vec<f64>>,
    started: Instant,
    last_cycle: u64,
    messages: Vec<String>,
}

impl StdoutSessionLogger {
    pub fn new() -> Self {
        Self {
            stage_ms: BTreeMap::new(),
            counters: BTreeMap::new(),
            started: Instant::now(),
            last_cycle: 0,
            messages: Vec::new(),
        }
    }

    /// The end-of-session report, or `None` before anything was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.stage_ms.is_empty() && self.counters.is_empty() {
            return None;
        }

        let mut lines = vec![format!(
            "Session summary ({} cycles, {:.1}s total):",
            self.last_cycle,
            self.started.elapsed().as_secs_f64()
        )];
        lines.extend(self.stage_ms.iter().map(|(stage, samples)| {
            format!(
                "  {stage:10}: avg {:6.1}ms  total {:7.0}ms  ({} calls)",
                average(samples),
                samples.iter().sum::<f64>(),
                samples.len()
            )
        }));
        lines.extend(self.counters.iter().map(|(name, samples)| {
            format!(
                "  {name}: avg {:.1}  total {:.0}",
                average(samples),
                samples.iter().sum::<f64>()
            )
        }));

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.stage_ms.get(stage).map(Vec::as_slice)
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.counters.get(name).map(Vec::as_slice)
    }

    pub fn cycles(&self) -> u64 {
        self.last_cycle
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn average(samples: &[f64]) -> f64 {
    match samples.len() {
        0 => 0.0,
        n => samples.iter().sum::<f64>() / n as f64,
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn cycle(&mut self, cycle: u64) {
        self.last_cycle = self.last_cycle.max(cycle);
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.stage_ms
            .entry(stage.to_owned())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.counters
            .entry(name.to_owned())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
        self.messages.push(message.to_owned());
    }

    fn summary(&self) {
        if let Some(report) = self.summary_string() {
            log::info!("\n\n{report}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_ignores_everything() {
        let mut logger = NullSessionLogger;
        logger.cycle(1);
        logger.timing("classify", 5.0);
        logger.metric("faces", 3.0);
        logger.info("ignored");
        logger.summary();
    }

    #[test]
    fn test_stage_timings_are_kept_per_stage() {
        let mut logger = StdoutSessionLogger::new();
        logger.timing("detect", 12.0);
        logger.timing("classify", 5.0);
        logger.timing("detect", 18.0);

        assert_eq!(logger.timings_for("detect").unwrap(), &[12.0, 18.0]);
        assert_eq!(logger.timings_for("classify").unwrap(), &[5.0]);
        assert!(logger.timings_for("assign").is_none());
    }

    #[test]
    fn test_metric_samples_average() {
        let mut logger = StdoutSessionLogger::new();
        logger.metric("faces", 3.0);
        logger.metric("faces", 4.0);

        assert_relative_eq!(average(logger.metrics_for("faces").unwrap()), 3.5);
        assert_relative_eq!(average(&[]), 0.0);
    }

    #[test]
    fn test_cycle_count_is_the_latest_cycle() {
        let mut logger = StdoutSessionLogger::new();
        for cycle in [1, 3, 2] {
            logger.cycle(cycle);
        }
        assert_eq!(logger.cycles(), 3);
    }

    #[test]
    fn test_summary_lists_stages_then_metrics() {
        let mut logger = StdoutSessionLogger::new();
        logger.cycle(2);
        logger.timing("detect", 20.0);
        logger.timing("assign", 0.5);
        logger.metric("markers_created", 2.0);
        logger.metric("markers_created", 1.0);

        let report = logger.summary_string().unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert!(lines[0].starts_with("Session summary (2 cycles"));
        assert!(lines[1].trim_start().starts_with("assign"));
        assert!(lines[2].trim_start().starts_with("detect"));
        assert_eq!(lines[3], "  markers_created: avg 1.5  total 3");
    }

    #[test]
    fn test_no_summary_before_any_sample() {
        let mut logger = StdoutSessionLogger::new();
        logger.cycle(1);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_info_messages_are_kept() {
        let mut logger = StdoutSessionLogger::new();
        logger.info("camera ready");
        assert_eq!(logger.messages(), ["camera ready".to_string()]);
    }
}
