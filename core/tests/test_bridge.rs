// It is designed to validate the primitive surface an engine sees:
//
// * `getbyte` / `putbyte` / `flush` / `rewind`
// * `getdecompressedsize`
// * `getfreq` / `putfreq`
// * contract errors (unknown ids, out-of-range values, closed channels)

#[cfg(test)]
mod tests {
    use bytebridge_core::{
        bridge::{Bridge, EngineHost},
        channel::{ChannelError, ChannelKind},
        config::BridgeConfig,
        constants::END_OF_STREAM,
        types::BridgeError,
    };
    use tempfile::TempDir;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn bridge_with(dir: &TempDir, source: &[u8], capacity: usize) -> Bridge {
        let input = dir.path().join("in.bin");
        std::fs::write(&input, source).unwrap();
        let output = dir.path().join("out.bin");

        Bridge::from_paths(&[input], &[output], &BridgeConfig::with_capacity(capacity)).unwrap()
    }

    #[test]
    fn end_to_end_256_bytes_through_small_buffers() {
        init_logs();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bytes.bin");

        let mut writer = Bridge::from_paths(
            &[dir.path().join("unused.bin")],
            &[path.clone()],
            &BridgeConfig::with_capacity(16),
        )
        .unwrap();
        for v in 0..=255 {
            writer.putbyte(0, v).unwrap();
        }
        writer.flush(0).unwrap();
        writer.close_all();

        let mut reader = Bridge::from_paths(&[path.clone()], &[dir.path().join("x.bin")], &BridgeConfig::with_capacity(64))
            .unwrap();
        let mut read_back = Vec::new();
        for _ in 0..256 {
            read_back.push(reader.getbyte(0).unwrap());
        }

        assert_eq!(read_back, (0..=255).collect::<Vec<i32>>());
        assert_eq!(reader.getbyte(0).unwrap(), END_OF_STREAM);
        assert!(!dir.path().join("unused.bin").exists());
    }

    #[test]
    fn rewind_restarts_getbyte() {
        let dir = TempDir::new().unwrap();
        let mut bridge = bridge_with(&dir, b"abc", 2);

        let first: Vec<i32> = (0..3).map(|_| bridge.getbyte(0).unwrap()).collect();
        assert_eq!(bridge.getbyte(0).unwrap(), END_OF_STREAM);
        bridge.rewind(0).unwrap();
        let second: Vec<i32> = (0..3).map(|_| bridge.getbyte(0).unwrap()).collect();

        assert_eq!(first, vec![97, 98, 99]);
        assert_eq!(first, second);
    }

    #[test]
    fn decompressed_size_reports_size_source() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        std::fs::write(&a, vec![0u8; 1234]).unwrap();
        std::fs::write(&b, vec![0u8; 10]).unwrap();
        let outputs = [dir.path().join("o0.bin"), dir.path().join("o1.bin")];

        let mut bridge = Bridge::from_paths(&[a.clone(), b.clone()], &outputs, &BridgeConfig::default()).unwrap();
        assert_eq!(bridge.getdecompressedsize(1).unwrap(), 1234);
        assert_eq!(bridge.getdecompressedsize(0).unwrap(), 1234);

        let config = BridgeConfig::new(None, Some(1), None);
        let mut bridge = Bridge::from_paths(&[a, b], &outputs, &config).unwrap();
        assert_eq!(bridge.getdecompressedsize(0).unwrap(), 10);
    }

    #[test]
    fn frequency_primitives_share_one_table() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.bin");
        std::fs::write(&input, b"x").unwrap();
        let inputs = [input.clone(), input];
        let outputs = [dir.path().join("o0.bin"), dir.path().join("o1.bin")];
        let mut bridge = Bridge::from_paths(&inputs, &outputs, &BridgeConfig::default()).unwrap();

        assert_eq!(bridge.getfreq(0, 42).unwrap(), 0);
        bridge.putfreq(0, 42, 7).unwrap();
        bridge.putfreq(0, 42, 9).unwrap();
        assert_eq!(bridge.getfreq(1, 42).unwrap(), 9);
        assert_eq!(bridge.getfreq(1, 43).unwrap(), 0);
        assert_eq!(bridge.frequencies().len(), 1);

        let counters = bridge.counters();
        assert_eq!(counters.freq_reads, 3);
        assert_eq!(counters.freq_writes, 2);
    }

    #[test]
    fn host_side_table_edits_are_visible_to_getfreq() {
        let dir = TempDir::new().unwrap();
        let mut bridge = bridge_with(&dir, b"", 8);

        bridge.frequencies_mut().put(5, 40);
        assert_eq!(bridge.getfreq(0, 5).unwrap(), 40);

        bridge.putfreq(0, 6, 2).unwrap();
        bridge.frequencies_mut().clear();
        assert_eq!(bridge.getfreq(0, 6).unwrap(), 0);
        assert!(bridge.frequencies().is_empty());
    }

    #[test]
    fn putbyte_rejects_values_outside_a_byte() {
        let dir = TempDir::new().unwrap();
        let mut bridge = bridge_with(&dir, b"", 8);

        assert!(matches!(bridge.putbyte(0, 256), Err(BridgeError::ByteOutOfRange { value: 256, .. })));
        assert!(matches!(bridge.putbyte(0, -1), Err(BridgeError::ByteOutOfRange { value: -1, .. })));
        assert_eq!(bridge.outputs().get(0).unwrap().pending(), 0);
    }

    #[test]
    fn putfreq_rejects_negative_counts() {
        let dir = TempDir::new().unwrap();
        let mut bridge = bridge_with(&dir, b"", 8);

        assert!(matches!(bridge.putfreq(0, 1, -5), Err(BridgeError::NegativeFrequency { symbol: 1, count: -5 })));
        assert!(!bridge.frequencies().contains(1));
    }

    #[test]
    fn unknown_ids_are_rejected_on_every_primitive() {
        let dir = TempDir::new().unwrap();
        let mut bridge = bridge_with(&dir, b"data", 8);

        let unknown = |r: Result<(), BridgeError>, kind: ChannelKind| match r {
            Err(BridgeError::Channel(ChannelError::UnknownChannel { kind: k, id: 3, len: 1 })) => assert_eq!(k, kind),
            other => panic!("expected unknown channel, got {:?}", other),
        };

        unknown(bridge.getbyte(3).map(|_| ()), ChannelKind::Input);
        unknown(bridge.rewind(3), ChannelKind::Input);
        unknown(bridge.getdecompressedsize(3).map(|_| ()), ChannelKind::Input);
        unknown(bridge.getfreq(3, 0).map(|_| ()), ChannelKind::Input);
        unknown(bridge.putfreq(3, 0, 1), ChannelKind::Input);
        unknown(bridge.putbyte(3, 1), ChannelKind::Output);
        unknown(bridge.flush(3), ChannelKind::Output);
    }

    #[test]
    fn closed_channels_reject_primitives() {
        let dir = TempDir::new().unwrap();
        let mut bridge = bridge_with(&dir, b"data", 8);

        assert_eq!(bridge.getbyte(0).unwrap(), i32::from(b'd'));
        bridge.close_input(0).unwrap();
        bridge.close_output(0).unwrap();
        bridge.close_input(0).unwrap();

        assert!(matches!(bridge.getbyte(0), Err(BridgeError::Channel(ChannelError::Closed { .. }))));
        assert!(matches!(bridge.rewind(0), Err(BridgeError::Channel(ChannelError::Closed { .. }))));
        assert!(matches!(bridge.putbyte(0, 1), Err(BridgeError::Channel(ChannelError::Closed { .. }))));
        assert!(matches!(bridge.flush(0), Err(BridgeError::Channel(ChannelError::Closed { .. }))));
        assert!(!dir.path().join("out.bin").exists());
    }

    #[test]
    fn size_source_must_address_an_input() {
        let dir = TempDir::new().unwrap();
        let config = BridgeConfig::new(None, Some(2), None);
        let result = Bridge::from_paths(&[dir.path().join("a")], &[dir.path().join("b")], &config);

        assert!(matches!(result, Err(BridgeError::Config(_))));
    }

    #[test]
    fn invalid_capacity_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = Bridge::from_paths(&[dir.path().join("a")], &[dir.path().join("b")], &BridgeConfig::with_capacity(0));

        assert!(matches!(result, Err(BridgeError::Config(_))));
    }
}
