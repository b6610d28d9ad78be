use std::collections::HashMap;
use traceboard_types::{
    DateRange, DurationStats, ProviderUsage, Rollup, SessionRecord, UsageCount,
};

/// Compute the cross-session rollup.
///
/// A pure function of the full per-session slice: counts are consistent sums
/// over exactly these records, never carried over from a previous rollup.
/// Callers pass sessions in their deterministic sorted order, which is what
/// "first seen" means for ranking tie-breaks — so the result cannot depend on
/// the order files or summaries were merged in.
///
/// Provider usage counts sessions: each session contributes once per distinct
/// provider/model pair it observed.
pub fn compute_rollup(sessions: &[SessionRecord]) -> Rollup {
    let mut agents = RankedCounter::new();
    let mut tools = RankedCounter::new();
    let mut providers = RankedCounter::new();
    let mut error_types = RankedCounter::new();
    let mut provider_parts: HashMap<String, (String, Option<String>)> = HashMap::new();

    let mut total_turns = 0u64;
    let mut total_events = 0u64;
    let mut error_count = 0u64;
    let mut durations: Vec<f64> = Vec::new();
    let mut first_start = None;
    let mut last_end = None;

    for session in sessions {
        total_turns += session.turn_count;
        total_events += session.event_count;
        error_count += session.error_count();

        for invocation in &session.agent_invocations {
            agents.add(&invocation.agent);
        }
        for call in &session.tool_calls {
            tools.add(&call.tool);
        }
        for observation in &session.providers {
            let label = observation.label();
            provider_parts
                .entry(label.clone())
                .or_insert_with(|| (observation.provider.clone(), observation.model.clone()));
            providers.add(&label);
        }
        for error in &session.errors {
            error_types.add(&error.error_type);
        }

        if let Some(duration) = session.duration_seconds {
            durations.push(duration);
        }
        if let Some(start) = session.start_time {
            first_start = Some(match first_start {
                Some(current) if current < start => current,
                _ => start,
            });
        }
        if let Some(end) = session.end_time {
            last_end = Some(match last_end {
                Some(current) if current > end => current,
                _ => end,
            });
        }
    }

    let total_agent_invocations = agents.total();
    let total_tool_calls = tools.total();

    Rollup {
        total_sessions: sessions.len() as u64,
        total_turns,
        total_events,
        total_agent_invocations,
        total_tool_calls,
        agent_usage: agents.into_ranked(),
        tool_usage: tools.into_ranked(),
        provider_usage: providers
            .into_ranked()
            .into_iter()
            .map(|entry| {
                let (provider, model) = provider_parts
                    .remove(&entry.name)
                    .unwrap_or((entry.name.clone(), None));
                ProviderUsage { provider, model, count: entry.count }
            })
            .collect(),
        error_count,
        error_types: error_types.into_ranked(),
        duration: duration_stats(&mut durations),
        date_range: match (first_start, last_end) {
            (Some(first), Some(last)) => Some(DateRange { first, last }),
            _ => None,
        },
    }
}

fn duration_stats(durations: &mut Vec<f64>) -> Option<DurationStats> {
    if durations.is_empty() {
        return None;
    }

    durations.sort_by(|a, b| a.total_cmp(b));
    let count = durations.len();
    let mean = durations.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        durations[count / 2]
    } else {
        (durations[count / 2 - 1] + durations[count / 2]) / 2.0
    };

    Some(DurationStats {
        mean_seconds: mean,
        median_seconds: median,
        max_seconds: durations[count - 1],
        sessions_timed: count as u64,
    })
}

/// Occurrence counter that remembers first-seen order for tie-breaking.
struct RankedCounter {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl RankedCounter {
    fn new() -> Self {
        Self { order: Vec::new(), counts: HashMap::new() }
    }

    fn add(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.order.push(name.to_string());
                self.counts.insert(name.to_string(), 1);
            }
        }
    }

    fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Ranked by count descending; the sort is stable, so equal counts keep
    /// first-seen order.
    fn into_ranked(mut self) -> Vec<UsageCount> {
        let mut ranked: Vec<UsageCount> = self
            .order
            .drain(..)
            .map(|name| {
                let count = self.counts[&name];
                UsageCount { name, count }
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}
