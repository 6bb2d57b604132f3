mod tests {
    use swarm_light::beacon::{BeaconCodec, BeaconConfig};
    use swarm_light::color::scale_color;
    use swarm_light::effect::PatternId;
    use swarm_light::event::{EventQueue, SwarmEvent, TrySendError};
    use swarm_light::palette::{ColorPalette, DEFAULT_PALETTE};
    use swarm_light::sync::SyncState;
    use swarm_light::{
        Advertiser, Duration, FrameScheduler, Instant, PixelSink, Rgb, SwarmConfig, SwarmContext,
        SwarmNode,
    };

    const LEDS: usize = 8;
    const AMBER: Rgb = Rgb::new(255, 120, 35);

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<Vec<Rgb>>,
    }

    impl PixelSink for RecordingSink {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    #[derive(Default)]
    struct RecordingAdvertiser {
        payloads: Vec<Vec<u8>>,
    }

    impl Advertiser for RecordingAdvertiser {
        fn advertise(&mut self, payload: &[u8]) {
            self.payloads.push(payload.to_vec());
        }
    }

    type Node<'a> = SwarmNode<'a, RecordingSink, RecordingAdvertiser, LEDS, 6, 16>;

    fn node<'a>(queue: &'a EventQueue<16>, config: &SwarmConfig) -> Node<'a> {
        SwarmNode::new(
            queue.receiver(),
            RecordingSink::default(),
            RecordingAdvertiser::default(),
            SwarmContext::new(config, ColorPalette::default()),
        )
    }

    fn encode(counter: u32) -> Vec<u8> {
        BeaconCodec::new(BeaconConfig::new())
            .encode(counter)
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_full_cycle_returns_to_low_amber() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let mut node = node(&queue, &SwarmConfig::new());

        for _ in 0..256 {
            sender.tick().unwrap();
            node.poll();
        }

        assert_eq!(node.context().clock().get(), 0);
        assert_eq!(node.sink().frames.len(), 256);
        let last = node.sink().frames.last().unwrap();
        assert!(last.iter().all(|led| *led == Rgb::new(10, 4, 1)));
    }

    #[test]
    fn test_one_beacon_per_cycle() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let mut node = node(&queue, &SwarmConfig::new());

        let mut advertised = 0;
        for _ in 0..3 * 256 {
            sender.tick().unwrap();
            advertised += node.poll().advertised;
        }

        assert_eq!(advertised, 3);
        assert_eq!(node.advertiser().payloads.len(), 3);
    }

    #[test]
    fn test_advertised_beacon_carries_counter() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let mut node = node(&queue, &SwarmConfig::new());

        for _ in 0..5 {
            sender.counter_tick().unwrap();
        }
        for _ in 0..256 {
            sender.tick().unwrap();
            node.poll();
        }

        assert_eq!(node.advertiser().payloads, vec![encode(5)]);
    }

    #[test]
    fn test_beacon_from_peer_ahead_resets_phase() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let mut node = node(&queue, &SwarmConfig::new());

        for _ in 0..10 {
            sender.tick().unwrap();
        }
        node.poll();
        assert_eq!(node.context().clock().get(), 160);

        sender.beacon(&encode(42)).unwrap();
        let summary = node.poll();

        assert_eq!(summary.phase_resets, 1);
        assert_eq!(node.context().clock().get(), 0);
        assert_eq!(node.context().sync().local_counter(), 0);
        assert_eq!(node.context().sync().state(), SyncState::Activating);
    }

    #[test]
    fn test_beacon_from_peer_behind_is_ignored() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let mut node = node(&queue, &SwarmConfig::new());

        for _ in 0..5 {
            sender.counter_tick().unwrap();
            sender.tick().unwrap();
            sender.tick().unwrap();
        }
        assert_eq!(node.poll().frames, 10);

        sender.beacon(&encode(4)).unwrap();
        sender.beacon(&encode(5)).unwrap();
        sender.beacon(b"\x02\x01\x06").unwrap();
        let summary = node.poll();

        assert_eq!(summary.events, 3);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.phase_resets, 0);
        assert_eq!(node.context().clock().get(), 160);
    }

    #[test]
    fn test_oversized_payload_not_queued() {
        let queue = EventQueue::<16>::new();
        let sender = queue.sender();
        sender.beacon(&[0u8; 40]).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_buttons() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let mut node = node(&queue, &SwarmConfig::new());

        sender.button(0).unwrap();
        sender.button(9).unwrap();
        node.poll();
        assert_eq!(node.context().selection().current_color(), DEFAULT_PALETTE[1]);

        sender.button(2).unwrap();
        sender.button(2).unwrap();
        node.poll();
        assert_eq!(node.context().selection().current_color(), DEFAULT_PALETTE[5]);

        sender.button(1).unwrap();
        node.poll();
        assert_eq!(node.context().selection().pattern(), PatternId::Meteor);

        sender.button(3).unwrap();
        node.poll();
        assert_eq!(node.context().sync().state(), SyncState::Activating);
        assert_eq!(node.context().sync().last_sync(), Some(0));
    }

    #[test]
    fn test_touch_sync_event() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let mut node = node(&queue, &SwarmConfig::new());

        sender.touch_sync().unwrap();
        sender.counter_tick().unwrap();
        node.poll();
        assert_eq!(node.context().sync().state(), SyncState::Active);
    }

    #[test]
    fn test_queue_full() {
        let queue = EventQueue::<2>::new();
        let sender = queue.sender();
        sender.tick().unwrap();
        sender.counter_tick().unwrap();
        assert_eq!(sender.touch_sync(), Err(TrySendError(SwarmEvent::TouchSync)));
        assert_eq!(queue.len(), 2);

        let receiver = queue.receiver();
        assert_eq!(receiver.try_receive(), Ok(SwarmEvent::Tick));
        assert_eq!(receiver.try_receive(), Ok(SwarmEvent::CounterTick));
        assert!(receiver.try_receive().is_err());
    }

    #[test]
    fn test_render_before_tick() {
        let queue = EventQueue::new();
        let mut node = node(&queue, &SwarmConfig::new());

        assert!(node.context().frame().iter().all(|led| *led == Rgb::default()));
        let frame = node.context_mut().render();
        assert!(frame.iter().all(|led| *led == scale_color(AMBER, 10)));
        assert_eq!(node.context().clock().get(), 0);
    }

    #[test]
    fn test_step_without_queue() {
        let queue = EventQueue::new();
        let mut node = node(&queue, &SwarmConfig::new());

        let outcome = node.step();
        assert_eq!(outcome.phase, 16);
        assert!(!outcome.advertise);
        assert_eq!(node.sink().frames.len(), 1);
    }

    #[test]
    fn test_advertising_disabled() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let config = SwarmConfig {
            advertise_phase: None,
            ..SwarmConfig::new()
        };
        let mut node = node(&queue, &config);

        for _ in 0..300 {
            sender.tick().unwrap();
            node.poll();
        }
        assert!(node.advertiser().payloads.is_empty());
    }

    #[test]
    fn test_scheduler_paces_frames() {
        let queue = EventQueue::new();
        let node = node(&queue, &SwarmConfig::new());
        let mut scheduler =
            FrameScheduler::new(node, Duration::from_millis(16), Duration::from_secs(1));

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.sleep_duration, Duration::from_millis(16));
        assert_eq!(result.counter_ticks, 0);

        let result = scheduler.tick(Instant::from_millis(16));
        assert_eq!(result.next_deadline, Instant::from_millis(32));
        assert_eq!(scheduler.node().context().clock().get(), 32);
    }

    #[test]
    fn test_scheduler_counter_ticks() {
        let queue = EventQueue::new();
        let node = node(&queue, &SwarmConfig::new());
        let mut scheduler =
            FrameScheduler::new(node, Duration::from_millis(16), Duration::from_secs(1));

        scheduler.tick(Instant::from_millis(0));
        let result = scheduler.tick(Instant::from_millis(3500));

        assert_eq!(result.counter_ticks, 3);
        assert_eq!(scheduler.node().context().sync().local_counter(), 3);
        // Stalled far behind, the backlog is skipped
        assert_eq!(result.next_deadline, Instant::from_millis(3516));
        assert_eq!(result.sleep_duration, Duration::from_millis(16));
    }

    #[test]
    fn test_scheduler_drains_events() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        let node = node(&queue, &SwarmConfig::new());
        let mut scheduler =
            FrameScheduler::new(node, Duration::from_millis(16), Duration::from_secs(1));

        sender.button(0).unwrap();
        let result = scheduler.tick(Instant::from_millis(0));

        assert_eq!(result.events.events, 1);
        assert_eq!(
            scheduler.node().context().selection().current_color(),
            DEFAULT_PALETTE[1]
        );
    }
}
