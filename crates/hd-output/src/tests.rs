//! Integration tests for hd-output.

#[cfg(test)]
mod csv_tests {
    use hd_behavior::BehaviorState;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{TickSummaryRow, TransitionRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn transition(agent_id: u32, tick: u64, to: BehaviorState) -> TransitionRow {
        TransitionRow { tick, agent_id, from: BehaviorState::Roam, to, health: 40.0 }
    }

    fn read_all(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("transitions.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "agent_id", "from", "to", "health"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "elapsed_secs", "events", "live_agents"]);
    }

    #[test]
    fn states_written_by_name() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_transitions(&[transition(0, 5, BehaviorState::Chase), transition(3, 5, BehaviorState::Dead)])
            .unwrap();
        w.finish().unwrap();

        let rows = read_all(dir.path().join("transitions.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "roam");
        assert_eq!(&rows[0][3], "chase");
        assert_eq!(&rows[1][1], "3");
        assert_eq!(&rows[1][3], "dead");
        assert_eq!(&rows[1][4], "40");
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 19, elapsed_secs: 2.0, events: 4, live_agents: 7 })
            .unwrap();
        w.finish().unwrap();

        let rows = read_all(dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "19");
        assert_eq!(&rows[0][1], "2.000");
        assert_eq!(&rows[0][2], "4");
        assert_eq!(&rows[0][3], "7");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_transitions(&[]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use hd_behavior::BehaviorState;
    use hd_core::{Point3, SimConfig};
    use hd_sim::SimBuilder;

    use crate::{CsvWriter, OutputError, OutputResult, OutputWriter, SimOutputObserver, TickSummaryRow, TransitionRow};

    /// Fails every write after the first `ok` calls.
    struct Flaky {
        ok:    usize,
        calls: usize,
    }

    impl Flaky {
        fn tick(&mut self) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok {
                return Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))));
            }
            Ok(())
        }
    }

    impl OutputWriter for Flaky {
        fn write_transitions(&mut self, _rows: &[TransitionRow]) -> OutputResult<()> {
            self.tick()
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.tick()
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_kept() {
        let mut sim = SimBuilder::new(SimConfig { total_ticks: 5, ..SimConfig::default() }).build().unwrap();
        let mut obs = SimOutputObserver::new(Flaky { ok: 2, calls: 0 });
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().expect("writes should have failed");
        assert_eq!(err.to_string(), "I/O error: write 3");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 5);
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig { tick_duration_ms: 100, total_ticks: 10, seed: 1 };
        let mut sim = SimBuilder::new(config)
            .agent(Point3::ORIGIN)
            .agent(Point3::new(2_000.0, 0.0, 0.0))
            .target(Point3::new(200.0, 0.0, 0.0))
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 10);
        assert_eq!(&summaries[9][3], "2");

        // both agents start roaming; the near one then gives chase
        let mut rdr = csv::Reader::from_path(dir.path().join("transitions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let roam = BehaviorState::Roam.as_str();
        let chase = BehaviorState::Chase.as_str();
        assert!(rows.iter().filter(|r| &r[3] == roam).count() >= 2);
        assert!(rows.iter().any(|r| &r[1] == "0" && &r[3] == chase));
        assert!(!rows.iter().any(|r| &r[1] == "1" && &r[3] == chase));
    }
}
