//! Demo orchestration: initialization sequence, MIDI consumer callback,
//! and the animation loop.

use anyhow::{Context, Result};
use push2_hw::{DisplayTransport, InputRouter, MidiEvent, Push2Display};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

use crate::bridge::DisplayBridge;
use crate::config::Config;
use crate::status::{format_midi_event, StatusLog, StatusSink};
use crate::wave::WaveScene;

/// Logical time added per animation tick, independent of wall-clock drift.
const TIME_STEP: f32 = 0.02;

/// The running demo: bridge, input routing, and animation state.
pub struct Demo {
    bridge: DisplayBridge,
    router: InputRouter,
    scene: WaveScene,
    elapsed: f32,
    frame_interval: Duration,
}

impl Demo {
    /// Initializes display, bridge, and input routing, in that order.
    /// The first failing stage short-circuits the rest.
    pub fn init(config: &Config, sink: Arc<dyn StatusSink>) -> Result<Self> {
        Self::init_with(
            config,
            sink,
            || Push2Display::open().map(|d| Box::new(d) as Box<dyn DisplayTransport>),
            |pattern| {
                let mut router = InputRouter::new(pattern);
                router.connect()?;
                Ok(router)
            },
        )
    }

    fn init_with(
        config: &Config,
        sink: Arc<dyn StatusSink>,
        open_display: impl FnOnce() -> push2_hw::Result<Box<dyn DisplayTransport>>,
        open_input: impl FnOnce(&str) -> push2_hw::Result<InputRouter>,
    ) -> Result<Self> {
        let transport = open_display().context("Failed to init push2 display")?;
        let bridge =
            DisplayBridge::with_dimensions(transport, config.canvas.width, config.canvas.height)
                .context("Failed to init bridge")?;
        let router = open_input(&config.input_port).context("Failed to open midi device")?;

        let log = Arc::new(Mutex::new(StatusLog::new()));
        router.set_callback(status_callback(log, sink));

        Ok(Self {
            bridge,
            router,
            scene: WaveScene::new(),
            elapsed: 0.0,
            frame_interval: Duration::from_secs(1) / config.frame_rate.max(1),
        })
    }

    /// Runs the animation loop until process teardown. One flip per tick,
    /// strictly in tick order.
    pub async fn run(mut self) {
        info!(
            "Animation running at {:?}/frame on '{}'",
            self.frame_interval,
            self.router.port_name().unwrap_or("<unknown>")
        );

        let mut ticker = tokio::time::interval(self.frame_interval);
        loop {
            ticker.tick().await;
            self.tick();
        }
    }

    /// Advances logical time, renders one frame, and flips it out.
    fn tick(&mut self) {
        self.elapsed += TIME_STEP;
        self.scene.render(self.bridge.surface_mut(), self.elapsed);

        // The transport was proven live at init; a failing flip is a
        // broken invariant, not a recoverable condition.
        if let Err(e) = self.bridge.flip() {
            panic!("display transport failed during flip: {e}");
        }
    }
}

/// Builds the MIDI consumer callback: keep 3-byte messages, append to the
/// bounded log, republish the projection to the status display. The log
/// mutex is the interaction lock for the status display; the publish
/// happens while it is held.
fn status_callback(
    log: Arc<Mutex<StatusLog>>,
    sink: Arc<dyn StatusSink>,
) -> impl FnMut(MidiEvent) + Send + 'static {
    move |event| {
        let Ok(data) = <[u8; 3]>::try_from(event.data.as_slice()) else {
            return;
        };
        let line = format_midi_event(event.timestamp, &data);

        let mut log = log.lock().unwrap();
        log.push(line);
        sink.publish(&log.projection());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use push2_hw::{DisplayBitmap, Error};
    use std::cell::Cell;

    struct NullTransport;

    impl DisplayTransport for NullTransport {
        fn flip(&self, _bitmap: &DisplayBitmap) -> push2_hw::Result<()> {
            Ok(())
        }
    }

    struct RecordingSink {
        published: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                published: Mutex::new(Vec::new()),
            })
        }
    }

    impl StatusSink for RecordingSink {
        fn publish(&self, status: &str) {
            self.published.lock().unwrap().push(status.to_string());
        }
    }

    #[test]
    fn test_display_failure_skips_input_stage() {
        let sink = RecordingSink::new();
        let input_attempted = Cell::new(false);

        let result = Demo::init_with(
            &Config::default(),
            sink,
            || Err(Error::DisplayNotFound),
            |_| {
                input_attempted.set(true);
                Err(Error::InputPortNotFound("ableton push 2".into()))
            },
        );

        let err = result.err().unwrap();
        assert!(format!("{err:#}").contains("Failed to init push2 display"));
        assert!(!input_attempted.get());
    }

    #[test]
    fn test_zero_canvas_config_fails_bridge_stage() {
        let sink = RecordingSink::new();
        let input_attempted = Cell::new(false);

        let mut config = Config::default();
        config.canvas.width = 0;

        let result = Demo::init_with(
            &config,
            sink,
            || Ok(Box::new(NullTransport)),
            |_| {
                input_attempted.set(true);
                Err(Error::InputPortNotFound("ableton push 2".into()))
            },
        );

        // Surfaces as a failed stage; does not panic, does not reach input
        let err = result.err().unwrap();
        assert!(format!("{err:#}").contains("Failed to init bridge"));
        assert!(!input_attempted.get());
    }

    #[test]
    fn test_input_failure_reports_its_stage() {
        let sink = RecordingSink::new();

        let result = Demo::init_with(
            &Config::default(),
            sink,
            || Ok(Box::new(NullTransport)),
            |_| Err(Error::InputPortNotFound("ableton push 2".into())),
        );

        let err = result.err().unwrap();
        assert!(format!("{err:#}").contains("Failed to open midi device"));
    }

    #[test]
    fn test_status_callback_filters_and_bounds() {
        let sink = RecordingSink::new();
        let log = Arc::new(Mutex::new(StatusLog::new()));
        let mut cb = status_callback(log, sink.clone());

        // Non-3-byte payloads are ignored
        cb(MidiEvent {
            timestamp: 0.1,
            data: vec![0xF8],
        });
        assert!(sink.published.lock().unwrap().is_empty());

        for i in 0..5u8 {
            cb(MidiEvent {
                timestamp: f64::from(i),
                data: vec![0x90, 0x3C, i],
            });
        }

        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 5);

        // The last projection holds the four newest entries, oldest first
        let lines: Vec<&str> = published.last().unwrap().lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Midi (1): 0x90 - 0x3C - 0x01");
        assert_eq!(lines[3], "Midi (4): 0x90 - 0x3C - 0x04");
    }
}
