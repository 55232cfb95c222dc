#[cfg(test)]
mod telemetry_snapshot_tests {
    use std::time::Duration;

    use bytebridge_core::channel::input::InputStats;
    use bytebridge_core::channel::output::OutputStats;
    use bytebridge_core::telemetry::{Stage, StageTimes, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
    use bytebridge_core::types::BridgeError;

    fn make_counters() -> TelemetryCounters {
        TelemetryCounters {
            bytes_read: 1_000,
            bytes_written: 600,
            refills: 4,
            flushes: 3,
            rewinds: 1,
            end_of_stream: 2,
            freq_reads: 256,
            freq_writes: 256,
            phases_compress: 1,
            phases_decompress: 1,
        }
    }

    fn make_timer() -> TelemetryTimer {
        let mut timer = TelemetryTimer::new();
        std::thread::sleep(Duration::from_millis(20)); // ensure elapsed > stage times
        timer.add_stage_time(Stage::Read, Duration::from_millis(5));
        timer.add_stage_time(Stage::Write, Duration::from_millis(10));
        timer.finish();
        timer
    }

    #[test]
    fn counters_round_trip_through_bincode() {
        let counters = make_counters();
        let bytes = counters.to_bytes().unwrap();
        assert_eq!(TelemetryCounters::from_bytes(&bytes).unwrap(), counters);
    }

    #[test]
    fn truncated_counter_bytes_are_rejected() {
        assert!(matches!(TelemetryCounters::from_bytes(&[]), Err(BridgeError::Telemetry(_))));
    }

    #[test]
    fn merge_and_add_assign_agree() {
        let mut merged = make_counters();
        merged.merge(&make_counters());

        let mut summed = make_counters();
        summed += make_counters();

        assert_eq!(merged, summed);
        assert_eq!(merged.bytes_read, 2_000);
        assert_eq!(merged.freq_writes, 512);
    }

    #[test]
    fn channel_stats_feed_counters() {
        let mut counters = TelemetryCounters::default();
        counters.add_input(&InputStats { refills: 2, bytes_loaded: 128, rewinds: 1, end_of_stream: 1, ..InputStats::default() });
        counters.add_output(&OutputStats { flushes: 3, bytes_written: 90, ..OutputStats::default() });

        assert_eq!(counters.bytes_read, 128);
        assert_eq!(counters.refills, 2);
        assert_eq!(counters.rewinds, 1);
        assert_eq!(counters.end_of_stream, 1);
        assert_eq!(counters.flushes, 3);
        assert_eq!(counters.bytes_written, 90);
    }

    #[test]
    fn stage_times_accumulate() {
        let mut times = StageTimes::default();
        times.add(Stage::Compress, Duration::from_millis(2));
        times.add(Stage::Compress, Duration::from_millis(3));

        assert_eq!(times.get(Stage::Compress), Duration::from_millis(5));
        assert_eq!(times.get(Stage::Verify), Duration::ZERO);
        assert!(times.has_all(&[Stage::Compress]));
        assert!(!times.has_all(&[Stage::Compress, Stage::Decompress]));
        assert_eq!((&times).into_iter().count(), 1);
    }

    #[test]
    fn snapshot_ratio_and_stage_totals() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer(), 400, 100);

        assert_eq!(snapshot.bytes_read, 1_000);
        assert_eq!(snapshot.compression_ratio, 0.25);
        assert_eq!(snapshot.total_stage_time(), Duration::from_millis(15));
        assert!(snapshot.elapsed >= snapshot.total_stage_time());
        assert!(snapshot.throughput_bytes_per_sec > 0.0);
        assert!(snapshot.has_all_stages(&[Stage::Read, Stage::Write]));
        assert!(!snapshot.has_all_stages(&[Stage::Verify]));
    }

    #[test]
    fn snapshot_ratio_is_zero_without_source_bytes() {
        let snapshot = TelemetrySnapshot::from(&TelemetryCounters::default(), &make_timer(), 0, 0);
        assert_eq!(snapshot.compression_ratio, 0.0);
    }

    #[test]
    fn snapshot_exports_json() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer(), 400, 100);
        let json = snapshot.to_json().unwrap();

        assert!(json.contains("\"compression_ratio\""));
        assert!(json.contains("\"Read\""));

        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.freq_reads, 256);
        assert_eq!(back.stage_times.get(Stage::Write), Duration::from_millis(10));
    }

    #[test]
    fn timed_closure_is_charged_to_its_stage() {
        let mut timer = TelemetryTimer::new();
        let result: Result<u32, BridgeError> = timer.time(Stage::Verify, || {
            std::thread::sleep(Duration::from_millis(2));
            Err(BridgeError::Engine("boom".into()))
        });

        assert!(result.is_err());
        assert!(timer.stage_times().get(Stage::Verify) >= Duration::from_millis(2));
        assert_eq!(timer.stage_times().total(), timer.stage_times().get(Stage::Verify));
    }

    #[test]
    fn stage_display_names() {
        assert_eq!(Stage::Decompress.to_string(), "decompress");
        assert_eq!(Stage::Verify.to_string(), "verify");
        assert_eq!(Stage::ALL.len(), 5);
    }
}
