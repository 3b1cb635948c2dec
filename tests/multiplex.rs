mod tests {
    use charlie_multiplex::sim::SimPins;
    use charlie_multiplex::{Charlieplex, LED_COUNT, LedMask, SlotPhase};

    fn multiplexing(mask: LedMask, brightness: u8, fast_pwm: bool) -> Charlieplex<SimPins> {
        let matrix = Charlieplex::new(SimPins::new());
        matrix.set_brightness(brightness);
        matrix.set_fast_pwm_mode(fast_pwm);
        matrix.enable_multiplex(mask);
        matrix
    }

    /// LED selected by each of the next `slots` wraps
    fn selections(matrix: &Charlieplex<SimPins>, slots: usize) -> heapless::Vec<u8, 128> {
        let period = usize::from(matrix.snapshot().period());
        let mut out = heapless::Vec::new();
        for _ in 0..slots {
            matrix.on_tick();
            let _ = out.push(matrix.selected_led().unwrap_or(u8::MAX));
            for _ in 1..period {
                matrix.on_tick();
            }
        }
        out
    }

    #[test]
    fn test_three_leds_at_half_brightness() {
        let matrix = multiplexing([0, 5, 10].into_iter().collect(), 128, false);

        for expected in [0, 5, 10, 0] {
            let mut driving = 0;
            let mut idle = 0;
            for _ in 0..256 {
                match matrix.on_tick() {
                    SlotPhase::Driving(led) => {
                        assert_eq!(led, expected);
                        assert_eq!(matrix.with_pins(|pins| pins.lit_led()), Some(expected));
                        driving += 1;
                    }
                    SlotPhase::IdleSelected(led) => {
                        assert_eq!(led, expected);
                        assert!(matrix.with_pins(|pins| pins.all_floating()));
                        idle += 1;
                    }
                    SlotPhase::NoneSelected => panic!("slot without selection"),
                }
            }
            assert_eq!(driving, 128);
            assert_eq!(idle, 128);
        }
    }

    #[test]
    fn test_every_enabled_led_gets_one_slot_per_sweep() {
        let mask: LedMask = [1, 2, 17, 30, 33, 41].into_iter().collect();
        let matrix = multiplexing(mask, 255, true);

        let sweep = selections(&matrix, 6);
        assert_eq!(sweep.as_slice(), &[1, 2, 17, 30, 33, 41]);

        // next sweep starts over from the lowest index
        let sweep = selections(&matrix, 6);
        assert_eq!(sweep.as_slice(), &[1, 2, 17, 30, 33, 41]);
    }

    #[test]
    fn test_full_mask_sweeps_all_leds() {
        let matrix = multiplexing(LedMask::FULL, 1, true);
        let sweep = selections(&matrix, LED_COUNT);
        for (slot, led) in sweep.iter().enumerate() {
            assert_eq!(usize::from(*led), slot);
        }
    }

    #[test]
    fn test_mask_change_applies_at_next_slot() {
        let matrix = multiplexing([0, 20].into_iter().collect(), 128, true);
        assert_eq!(selections(&matrix, 1).as_slice(), &[0]);

        matrix.replace_bitmask([21, 40].into_iter().collect());
        // cursor sits after LED 0, so the scan picks the first enabled LED from 1
        assert_eq!(selections(&matrix, 3).as_slice(), &[21, 40, 21]);
    }

    #[test]
    fn test_deselected_led_finishes_its_slot() {
        let matrix = multiplexing([0, 5].into_iter().collect(), 255, false);
        assert_eq!(matrix.on_tick(), SlotPhase::Driving(0));

        matrix.replace_bitmask(LedMask::single(5));
        for _ in 1..255 {
            assert_eq!(matrix.on_tick(), SlotPhase::Driving(0));
        }
        assert_eq!(matrix.on_tick(), SlotPhase::IdleSelected(0));

        // the wrap moves on to what the new mask enables
        assert_eq!(matrix.on_tick(), SlotPhase::Driving(5));
        assert_eq!(matrix.with_pins(|pins| pins.lit_led()), Some(5));
    }

    #[test]
    fn test_empty_mask_selects_nothing() {
        let matrix = multiplexing(LedMask::EMPTY, 255, false);
        for _ in 0..1024 {
            assert_eq!(matrix.on_tick(), SlotPhase::NoneSelected);
        }
        assert_eq!(matrix.with_pins(|pins| pins.drive_count()), 0);
    }

    fn driving_ticks(brightness: u8, fast_pwm: bool) -> u32 {
        let matrix = multiplexing(LedMask::single(3), brightness, fast_pwm);
        let period = matrix.snapshot().period();
        let mut driving = 0;
        for _ in 0..period {
            if let SlotPhase::Driving(3) = matrix.on_tick() {
                driving += 1;
            }
        }
        driving
    }

    #[test]
    fn test_duty_cycle_fast_mode() {
        assert_eq!(driving_ticks(0, true), 0);
        assert_eq!(driving_ticks(1, true), 1);
        assert_eq!(driving_ticks(32, true), 32);
        assert_eq!(driving_ticks(63, true), 63);
        assert_eq!(driving_ticks(64, true), 64);
        // anything above the period saturates
        assert_eq!(driving_ticks(200, true), 64);
    }

    #[test]
    fn test_duty_cycle_normal_mode() {
        assert_eq!(driving_ticks(0, false), 0);
        assert_eq!(driving_ticks(1, false), 1);
        assert_eq!(driving_ticks(128, false), 128);
        assert_eq!(driving_ticks(255, false), 255);
    }

    /// Ticks LED 9 spends driven over `periods` PWM periods of direct drive
    fn direct_driving_ticks(brightness: u8, fast_pwm: bool, periods: u16) -> u32 {
        let matrix = Charlieplex::new(SimPins::new());
        matrix.set_brightness(brightness);
        matrix.set_fast_pwm_mode(fast_pwm);
        matrix.direct_drive(9, true);
        let period = matrix.snapshot().period();
        let mut driving = 0;
        for _ in 0..period * periods {
            match matrix.on_tick() {
                SlotPhase::Driving(led) => {
                    assert_eq!(led, 9);
                    assert_eq!(matrix.with_pins(|pins| pins.lit_led()), Some(9));
                    driving += 1;
                }
                SlotPhase::IdleSelected(led) => {
                    assert_eq!(led, 9);
                    assert!(matrix.with_pins(|pins| pins.all_floating()));
                }
                SlotPhase::NoneSelected => panic!("direct drive lost its selection"),
            }
        }
        driving
    }

    #[test]
    fn test_direct_drive_duty_cycle_normal_mode() {
        assert_eq!(direct_driving_ticks(0, false, 3), 0);
        assert_eq!(direct_driving_ticks(1, false, 3), 3);
        assert_eq!(direct_driving_ticks(128, false, 3), 384);
        assert_eq!(direct_driving_ticks(255, false, 3), 765);
    }

    #[test]
    fn test_direct_drive_duty_cycle_fast_mode() {
        assert_eq!(direct_driving_ticks(0, true, 3), 0);
        assert_eq!(direct_driving_ticks(1, true, 3), 3);
        assert_eq!(direct_driving_ticks(32, true, 3), 96);
        assert_eq!(direct_driving_ticks(63, true, 3), 189);
        assert_eq!(direct_driving_ticks(64, true, 3), 192);
        assert_eq!(direct_driving_ticks(200, true, 3), 192);
    }

    #[test]
    fn test_tick_inside_critical_section_matches_on_tick() {
        let mask: LedMask = [0, 5, 10, 41].into_iter().collect();
        let plain = multiplexing(mask, 100, true);
        let nested = multiplexing(mask, 100, true);

        for step in 0..2_000u32 {
            if step == 700 {
                plain.set_fast_pwm_mode(false);
                nested.set_fast_pwm_mode(false);
            }
            let expected = plain.on_tick();
            let phase = critical_section::with(|cs| nested.on_tick_in(cs));
            assert_eq!(phase, expected, "tick {step}");
        }
        assert_eq!(
            plain.with_pins(|pins| pins.drive_count()),
            nested.with_pins(|pins| pins.drive_count())
        );
    }

    #[test]
    fn test_fast_mode_switch_mid_period() {
        let matrix = multiplexing([0, 5].into_iter().collect(), 128, false);
        for _ in 0..101 {
            matrix.on_tick();
        }
        assert_eq!(matrix.snapshot().counter(), 100);
        assert_eq!(matrix.selected_led(), Some(0));

        matrix.set_fast_pwm_mode(true);
        // unchanged until the next tick
        assert_eq!(matrix.snapshot().counter(), 100);
        assert_eq!(matrix.selected_led(), Some(0));

        // counter is past the short period, so the next tick wraps
        assert_eq!(matrix.on_tick(), SlotPhase::Driving(5));
        assert_eq!(matrix.snapshot().counter(), 0);

        for _ in 1..64 {
            matrix.on_tick();
        }
        assert_eq!(matrix.on_tick(), SlotPhase::Driving(0));
    }

    #[test]
    fn test_slow_mode_switch_extends_period() {
        let matrix = multiplexing([0, 5].into_iter().collect(), 128, true);
        for _ in 0..31 {
            matrix.on_tick();
        }
        assert_eq!(matrix.snapshot().counter(), 30);

        matrix.set_fast_pwm_mode(false);
        for _ in 31..256 {
            matrix.on_tick();
            assert_eq!(matrix.selected_led(), Some(0));
        }
        matrix.on_tick();
        assert_eq!(matrix.selected_led(), Some(5));
    }

    #[test]
    fn test_at_most_one_led_path_driven() {
        let matrix = multiplexing(LedMask::FULL, 200, false);
        for step in 0..20_000u32 {
            matrix.on_tick();
            if step == 5_000 {
                matrix.direct_drive(30, true);
            }
            if step == 10_000 {
                matrix.enable_multiplex([1, 2, 3].into_iter().collect());
            }
            if step == 15_000 {
                matrix.set_fast_pwm_mode(true);
            }
            let (driven, lit) = matrix.with_pins(|pins| (pins.driven_pins(), pins.lit_led()));
            assert!(driven == 0 || driven == 2);
            assert_eq!(driven == 2, lit.is_some());
        }
        assert_eq!(matrix.with_pins(|pins| pins.max_driven()), 2);
    }
}
