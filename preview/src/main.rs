//! Desktop preview for charlie-multiplex
//!
//! Runs the real scheduler against simulated pins at the board's tick rate
//! and shows how long each LED was lit, the way the eye would average it.
//! The grid is laid out by pins: row = anode, column = cathode.

use std::time::Instant as StdInstant;

use charlie_multiplex::sim::SimPins;
use charlie_multiplex::{
    Animator, Breathe, Charlieplex, Command, CommandChannel, CommandSender, Instant, LED_COUNT,
    PIN_COUNT, PatternId, PatternSlot, SlotPhase, TICK_PERIOD, lookup,
};
use eframe::egui::{self};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Command channel size
const COMMAND_CHANNEL_SIZE: usize = 16;

/// Size of each LED cell in pixels
const LED_SIZE: f32 = 36.0;

/// Gap between cells
const LED_GAP: f32 = 6.0;

/// Upper bound of simulated ticks per UI frame (one second of board time)
const MAX_TICKS_PER_FRAME: u64 = 50_000;

/// How much of the previous frame's glow survives into the next
const PERSISTENCE: f32 = 0.6;

static MATRIX: Charlieplex<SimPins> = Charlieplex::new(SimPins::new());

static COMMANDS: CommandChannel<COMMAND_CHANNEL_SIZE> = CommandChannel::new();

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 620.0])
            .with_title("Charlieplex Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "charlie-multiplex-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    animator: Animator<'static, SimPins, PatternSlot<SmallRng>, COMMAND_CHANNEL_SIZE>,
    commands: CommandSender<'static, COMMAND_CHANNEL_SIZE>,

    /// Currently selected pattern
    pattern_id: PatternId,
    /// Synthetic board time in microseconds
    t_us: u64,
    /// Next animator deadline in board time
    next_deadline: Instant,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether the board clock runs
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// PWM brightness (0-255)
    brightness: u8,
    /// Short PWM period
    fast_pwm: bool,
    /// Drive brightness with a breathing ramp
    breathe: Option<Breathe>,
    /// Visual gain applied to the averaged duty cycle
    gain: f32,
    /// Smoothed duty cycle per LED
    glow: [f32; LED_COUNT],
}

impl PreviewApp {
    fn new() -> Self {
        let pattern_id = PatternId::Sparkle;
        let mut animator = Animator::new(
            &MATRIX,
            pattern_id.to_slot(SmallRng::from_entropy()),
            COMMANDS.receiver(),
        );
        let start = Instant::from_micros(0);
        animator.start(start);
        let brightness = MATRIX.brightness();

        Self {
            animator,
            commands: COMMANDS.sender(),
            pattern_id,
            t_us: 0,
            next_deadline: start,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            brightness,
            fast_pwm: false,
            breathe: None,
            gain: 8.0,
            glow: [0.0; LED_COUNT],
        }
    }

    fn send(&self, command: Command) {
        let _ = self.commands.try_send(command);
    }

    fn switch_pattern(&mut self, pattern_id: PatternId) {
        self.pattern_id = pattern_id;
        self.animator
            .set_pattern(pattern_id.to_slot(SmallRng::from_entropy()));
    }

    /// Ticks of board time that elapsed since the last UI frame
    fn elapsed_ticks(&mut self) -> u64 {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if !self.playing {
            return 0;
        }
        let delta_us = delta.as_secs_f64() * 1_000_000.0 * f64::from(self.time_scale);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ticks = if delta_us.is_finite() {
            (delta_us.max(0.0) as u64) / TICK_PERIOD.as_micros().max(1)
        } else {
            0
        };
        ticks.min(MAX_TICKS_PER_FRAME)
    }

    /// Run the scheduler for `ticks` and fold the lit time into the glow
    fn simulate(&mut self, ticks: u64) {
        if ticks == 0 {
            return;
        }
        let mut lit = [0u32; LED_COUNT];
        for _ in 0..ticks {
            self.t_us += TICK_PERIOD.as_micros();
            let now = Instant::from_micros(self.t_us);
            if now >= self.next_deadline {
                if let Some(breathe) = self.breathe.as_mut() {
                    let _ = self.commands.try_send(Command::SetBrightness(breathe.next_level()));
                }
                self.next_deadline = self.animator.tick(now).next_deadline;
            }

            if let SlotPhase::Driving(led) = MATRIX.on_tick() {
                lit[usize::from(led)] += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let total = ticks as f32;
        for (glow, lit) in self.glow.iter_mut().zip(lit) {
            #[allow(clippy::cast_precision_loss)]
            let duty = lit as f32 / total;
            *glow = *glow * PERSISTENCE + duty * (1.0 - PERSISTENCE);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let ticks = self.elapsed_ticks();
        self.simulate(ticks);

        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.playing = !self.playing;
                }
                let secs = self.t_us / 1_000_000;
                let ms = (self.t_us / 1000) % 1000;
                ui.label(format!("Board time: {secs}.{ms:03}s"));
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.time_scale, 0.01..=2.0).logarithmic(true));
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Pattern:");
                let mut selected = self.pattern_id;
                egui::ComboBox::from_id_salt("pattern_selector")
                    .selected_text(self.pattern_id.as_str())
                    .show_ui(ui, |ui| {
                        for id in [
                            PatternId::Solid,
                            PatternId::Sparkle,
                            PatternId::Twinkle,
                            PatternId::Chase,
                        ] {
                            ui.selectable_value(&mut selected, id, id.as_str());
                        }
                    });
                if selected != self.pattern_id {
                    self.switch_pattern(selected);
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Brightness:");
                let old_brightness = self.brightness;
                ui.add_enabled(
                    self.breathe.is_none(),
                    egui::DragValue::new(&mut self.brightness).range(0u8..=255u8),
                );
                if self.brightness != old_brightness {
                    self.send(Command::SetBrightness(self.brightness));
                }

                ui.add_space(8.0);

                let mut breathing = self.breathe.is_some();
                if ui.checkbox(&mut breathing, "Breathe").changed() {
                    self.breathe = breathing.then(Breathe::perceptual);
                    if !breathing {
                        self.send(Command::SetBrightness(self.brightness));
                    }
                }

                ui.add_space(8.0);

                if ui.checkbox(&mut self.fast_pwm, "Fast PWM").changed() {
                    self.send(Command::SetFastPwm(self.fast_pwm));
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Gain:");
                ui.add(egui::Slider::new(&mut self.gain, 1.0..=42.0));
            });

            ui.add_space(4.0);

            let state = MATRIX.snapshot();
            ui.label(format!(
                "{} LEDs enabled, mode {:?}, period {} ticks",
                state.mask().count(),
                state.mode(),
                state.period()
            ));

            ui.add_space(12.0);

            // === LED grid ===
            let pitch = LED_SIZE + LED_GAP;
            #[allow(clippy::cast_precision_loss)]
            let side = PIN_COUNT as f32 * pitch;
            let (response, painter) =
                ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
            let origin = response.rect.min;

            for (led, glow) in (0u8..).zip(self.glow) {
                let Some(pair) = lookup(led) else {
                    continue;
                };
                let x = origin.x + f32::from(pair.cathode.index()) * pitch;
                let y = origin.y + f32::from(pair.anode.index()) * pitch;
                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let level = ((glow * self.gain).clamp(0.0, 1.0) * 255.0) as u8;
                let color = egui::Color32::from_rgb(level, level / 2, 0);
                painter.rect_filled(rect, 6.0, color);
            }

            for pin in 0..PIN_COUNT {
                #[allow(clippy::cast_precision_loss)]
                let offset = pin as f32 * pitch;
                let rect = egui::Rect::from_min_size(
                    egui::pos2(origin.x + offset, origin.y + offset),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );
                painter.rect_stroke(
                    rect,
                    6.0,
                    egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
                    egui::StrokeKind::Inside,
                );
            }
        });
    }
}
