mod tests {
    use charlie_multiplex::pattern::{TWINKLE_FRAME_COUNT, TWINKLE_FRAMES};
    use charlie_multiplex::{
        Breathe, Chase, LED_COUNT, LedMask, Pattern, PatternId, ProbeOutcome, Solid, Sparkle,
        SparkleStep, Twinkle,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn test_sparkle_converges_to_target() {
        let mut sparkle = Sparkle::new(rng(7), 8, 255);
        assert!(sparkle.mask().count() <= 8);

        for _ in 0..200 {
            sparkle.next_frame();
        }
        assert_eq!(sparkle.mask().count(), 8);

        // swaps keep the count exact once the target is reached
        for _ in 0..1000 {
            assert_eq!(sparkle.next_frame().count(), 8);
        }
        assert_eq!(sparkle.frames(), 1200);
    }

    #[test]
    fn test_sparkle_swaps_at_target() {
        let mut sparkle = Sparkle::new(rng(11), 8, 255);
        for _ in 0..200 {
            sparkle.step();
        }

        let mut swapped = false;
        for _ in 0..500 {
            let before = sparkle.mask();
            match sparkle.step() {
                SparkleStep::Swapped { lit, darkened } => {
                    assert!(!before.get(lit));
                    assert!(before.get(darkened));
                    assert!(sparkle.mask().get(lit));
                    assert!(!sparkle.mask().get(darkened));
                    swapped = true;
                }
                SparkleStep::Held | SparkleStep::Skipped => assert_eq!(sparkle.mask(), before),
                step => panic!("unexpected step at target: {step:?}"),
            }
        }
        assert!(swapped);
    }

    #[test]
    fn test_sparkle_shrinks_to_lower_target() {
        let mut sparkle = Sparkle::new(rng(3), 20, 255);
        for _ in 0..400 {
            sparkle.next_frame();
        }
        assert_eq!(sparkle.mask().count(), 20);

        sparkle.set_target_count(2);
        let mut shrank = false;
        for _ in 0..400 {
            if let SparkleStep::Shrank(ProbeOutcome::Flipped(_)) = sparkle.step() {
                shrank = true;
            }
        }
        assert!(shrank);
        assert_eq!(sparkle.mask().count(), 2);
    }

    #[test]
    fn test_sparkle_zero_probability_never_changes() {
        let mut sparkle = Sparkle::new(rng(5), 8, 0);
        let seeded = sparkle.mask();
        for _ in 0..100 {
            assert_eq!(sparkle.step(), SparkleStep::Skipped);
        }
        assert_eq!(sparkle.mask(), seeded);
    }

    #[test]
    fn test_sparkle_target_is_clamped() {
        let mut sparkle = Sparkle::new(rng(9), 100, 255);
        assert_eq!(usize::from(sparkle.target_count()), LED_COUNT);
        for _ in 0..2000 {
            sparkle.next_frame();
        }
        assert_eq!(sparkle.mask(), LedMask::FULL);
    }

    #[test]
    fn test_sparkle_reset_restarts_frame_counter() {
        let mut sparkle = Sparkle::new(rng(1), 4, 128);
        for _ in 0..10 {
            sparkle.next_frame();
        }
        sparkle.reset();
        assert_eq!(sparkle.frames(), 0);
        assert!(sparkle.mask().count() <= 4);
    }

    #[test]
    fn test_twinkle_returns_table_frames() {
        let mut twinkle = Twinkle::new(rng(42));
        let mut seen = [false; TWINKLE_FRAME_COUNT];
        for _ in 0..1000 {
            let frame = twinkle.next_frame();
            assert_eq!(frame, TWINKLE_FRAMES[twinkle.current()]);
            seen[twinkle.current()] = true;
        }
        assert!(seen.iter().all(|seen| *seen));
    }

    #[test]
    fn test_twinkle_frames_are_sparse() {
        for frame in TWINKLE_FRAMES {
            assert!(!frame.is_empty());
            assert!(frame.count() <= 12);
        }
    }

    #[test]
    fn test_chase_walks_every_led() {
        let mut chase = Chase::new();
        for lap in 0..2 {
            for led in 0..42 {
                let frame = chase.next_frame();
                assert_eq!(frame, LedMask::single(led), "lap {lap}");
            }
        }
        assert_eq!(Chase::starting_at(45).position(), 3);
    }

    #[test]
    fn test_solid_repeats_frame() {
        let mask: LedMask = [4, 8, 15].into_iter().collect();
        let mut solid = Solid(mask);
        assert_eq!(solid.next_frame(), mask);
        assert_eq!(solid.next_frame(), mask);
    }

    #[test]
    fn test_breathe_cycle() {
        let mut breathe = Breathe::new();
        let mut peak = 0;
        for _ in 0..510 {
            peak = peak.max(breathe.next_level());
        }
        assert_eq!(peak, 255);
        assert_eq!(breathe.next_level(), 0);
    }

    #[test]
    fn test_pattern_id_names() {
        for id in [
            PatternId::Solid,
            PatternId::Sparkle,
            PatternId::Twinkle,
            PatternId::Chase,
        ] {
            assert_eq!(PatternId::parse_from_str(id.as_str()), Some(id));
            assert_eq!(PatternId::from_raw(id as u8), Some(id));
        }
        assert_eq!(PatternId::parse_from_str("sparkle"), Some(PatternId::Sparkle));
        assert_eq!(PatternId::from_raw(4), None);
        assert_eq!(PatternId::parse_from_str("rainbow"), None);
    }

    #[test]
    fn test_pattern_slot_dispatch() {
        let mut slot = PatternId::Chase.to_slot(rng(0));
        assert_eq!(slot.id(), PatternId::Chase);
        assert_eq!(slot.next_frame(), LedMask::single(0));
        assert_eq!(slot.next_frame(), LedMask::single(1));
        slot.reset();
        assert_eq!(slot.next_frame(), LedMask::single(0));

        let mut slot = PatternId::Solid.to_slot(rng(0));
        assert_eq!(slot.next_frame(), LedMask::FULL);

        let slot = PatternId::Sparkle.to_slot(rng(0));
        assert_eq!(slot.id(), PatternId::Sparkle);
    }
}
