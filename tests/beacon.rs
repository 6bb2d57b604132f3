mod tests {
    use swarm_light::beacon::{
        AD_TYPE_COMPLETE_LOCAL_NAME, BeaconCodec, BeaconConfig, CounterWidth, DecodeError,
        EncodeError, MAX_BEACON_LEN,
    };

    fn codec(width: CounterWidth) -> BeaconCodec {
        BeaconCodec::new(BeaconConfig {
            width,
            ..BeaconConfig::new()
        })
    }

    #[test]
    fn test_encode_four_bytes() {
        let payload = codec(CounterWidth::Four).encode(0x0102_0304).unwrap();
        assert_eq!(
            payload.as_slice(),
            &[10, AD_TYPE_COMPLETE_LOCAL_NAME, b'S', b'W', b'A', b'R', b'M', 1, 2, 3, 4]
        );
    }

    #[test]
    fn test_encode_two_bytes_keeps_low_bits() {
        let payload = codec(CounterWidth::Two).encode(0x0001_2345).unwrap();
        assert_eq!(
            payload.as_slice(),
            &[8, AD_TYPE_COMPLETE_LOCAL_NAME, b'S', b'W', b'A', b'R', b'M', 0x23, 0x45]
        );
    }

    #[test]
    fn test_counter_at_fixed_offset() {
        let payload = codec(CounterWidth::Four).encode(258).unwrap();
        assert_eq!(&payload[7..11], &[0, 0, 1, 2]);
    }

    #[test]
    fn test_decode_own_payload() {
        let codec = codec(CounterWidth::Four);
        let payload = codec.encode(123_456).unwrap();
        assert_eq!(codec.decode(&payload), Ok(123_456));
    }

    #[test]
    fn test_decode_marker_anywhere() {
        // Flags AD structure ahead of the name
        let payload: [u8; 14] = [2, 0x01, 0x06, 10, 0x09, b'S', b'W', b'A', b'R', b'M', 0, 0, 0, 42];
        assert_eq!(codec(CounterWidth::Four).decode(&payload), Ok(42));

        let payload = [b'x', b'S', b'W', b'A', b'R', b'M', 0x01, 0x00];
        assert_eq!(codec(CounterWidth::Two).decode(&payload), Ok(256));
    }

    #[test]
    fn test_decode_missing_marker() {
        let codec = codec(CounterWidth::Four);
        assert_eq!(codec.decode(&[]), Err(DecodeError::MissingMarker));
        assert_eq!(
            codec.decode(b"\x07\x09SWAR\x00\x01"),
            Err(DecodeError::MissingMarker)
        );
        assert_eq!(
            codec.decode(b"\x0a\x09swarm\x00\x00\x00\x01"),
            Err(DecodeError::MissingMarker)
        );
    }

    #[test]
    fn test_decode_truncated() {
        let codec = codec(CounterWidth::Four);
        assert_eq!(codec.decode(b"SWARM"), Err(DecodeError::Truncated));
        assert_eq!(codec.decode(b"SWARM\x00\x00\x01"), Err(DecodeError::Truncated));
    }

    #[test]
    fn test_custom_marker() {
        let codec = BeaconCodec::new(BeaconConfig {
            marker: b"HIVE",
            ..BeaconConfig::new()
        });
        let payload = codec.encode(7).unwrap();
        assert_eq!(payload[0], 9);
        assert_eq!(codec.decode(&payload), Ok(7));
        assert_eq!(
            BeaconCodec::new(BeaconConfig::new()).decode(&payload),
            Err(DecodeError::MissingMarker)
        );
    }

    #[test]
    fn test_marker_too_long() {
        // 1 length + 1 type + 25 marker + 4 counter = 31 still fits
        let codec = BeaconCodec::new(BeaconConfig {
            marker: b"ABCDEFGHIJKLMNOPQRSTUVWXY",
            ..BeaconConfig::new()
        });
        assert_eq!(codec.encode(1).unwrap().len(), MAX_BEACON_LEN);

        let codec = BeaconCodec::new(BeaconConfig {
            marker: b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            ..BeaconConfig::new()
        });
        assert_eq!(codec.encode(1), Err(EncodeError::MarkerTooLong));
    }

    #[test]
    fn test_width_truncate() {
        assert_eq!(CounterWidth::Two.truncate(70_000), 70_000 - 65_536);
        assert_eq!(CounterWidth::Four.truncate(70_000), 70_000);
        assert_eq!(CounterWidth::default(), CounterWidth::Four);
    }
}
