use serde::Serialize;
use treasure_hunt_core::Event;

/// Event captured during an expedition, tagged with the round it happened in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct EventRecord {
    /// One-based round index.
    pub(crate) round: u64,
    /// Event reported by the world.
    pub(crate) event: Event,
}

/// Collects world events in the order they were reported.
#[derive(Debug, Default)]
pub(crate) struct EventLog {
    round: u64,
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Appends an event, following round boundaries as they are announced.
    pub(crate) fn record(&mut self, event: &Event) {
        if let Event::RoundStarted { round } = event {
            self.round = *round;
        }
        self.records.push(EventRecord {
            round: self.round,
            event: event.clone(),
        });
    }

    /// Number of recorded events.
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Renders the log as JSON lines, one event per line.
    pub(crate) fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut lines = Vec::with_capacity(self.records.len());
        for record in &self.records {
            lines.push(serde_json::to_string(record)?);
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_hunt_core::{AdventurerId, Orientation};

    #[test]
    fn records_follow_round_announcements() {
        let adventurer = AdventurerId::new(0);
        let mut log = EventLog::default();
        log.record(&Event::RoundStarted { round: 1 });
        log.record(&Event::AdventurerTurned {
            adventurer,
            from: Orientation::North,
            to: Orientation::West,
        });
        log.record(&Event::RoundStarted { round: 2 });
        log.record(&Event::InstructionsExhausted { adventurer });

        let rounds: Vec<u64> = log.records.iter().map(|record| record.round).collect();
        assert_eq!(rounds, vec![1, 1, 2, 2]);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn json_lines_hold_one_record_each() {
        let mut log = EventLog::default();
        log.record(&Event::RoundStarted { round: 1 });
        log.record(&Event::InstructionsExhausted {
            adventurer: AdventurerId::new(3),
        });

        let encoded = log.to_json_lines().expect("event log serializes");
        let lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"round":1,"event":{"RoundStarted":{"round":1}}}"#,
                r#"{"round":1,"event":{"InstructionsExhausted":{"adventurer":3}}}"#,
            ]
        );
    }
}
