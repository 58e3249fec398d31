//! MIDI input routing for the Push 2 control surface.
//!
//! Enumerates MIDI input endpoints, opens the first one whose name matches
//! the target substring, and forwards every received message to the
//! registered callback. Dispatch happens on the driver's delivery thread,
//! not the caller's.

use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::{Error, Result};

/// One raw MIDI message with its arrival timestamp in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiEvent {
    /// Driver timestamp, seconds since an arbitrary epoch.
    pub timestamp: f64,
    /// Raw message bytes (typically 3).
    pub data: Vec<u8>,
}

type MidiCallback = Box<dyn FnMut(MidiEvent) + Send>;

/// Routes messages from one MIDI input endpoint to a registered callback.
pub struct InputRouter {
    /// Target substring matched against endpoint names, case-insensitive.
    pattern: String,
    /// Registered consumer callback, shared with the driver thread.
    callback: Arc<Mutex<Option<MidiCallback>>>,
    /// Open connection; dropping it stops the driver thread.
    conn: Option<MidiInputConnection<()>>,
    /// Name of the connected port.
    port_name: Option<String>,
}

impl InputRouter {
    /// Creates a router targeting endpoints whose name contains `pattern`.
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            callback: Arc::new(Mutex::new(None)),
            conn: None,
            port_name: None,
        }
    }

    /// Lists available MIDI input port names, queried fresh.
    pub fn list_ports() -> Result<Vec<String>> {
        let midi_in = MidiInput::new("push2-hw-scanner")?;

        let mut port_names = Vec::new();
        for port in midi_in.ports() {
            if let Ok(name) = midi_in.port_name(&port) {
                port_names.push(name);
            }
        }

        Ok(port_names)
    }

    /// Registers the callback invoked for every received message,
    /// replacing any prior registration.
    pub fn set_callback(&self, callback: impl FnMut(MidiEvent) + Send + 'static) {
        *self.callback.lock().unwrap() = Some(Box::new(callback));
    }

    /// Finds an input port by case-insensitive substring match, in
    /// enumeration order.
    fn find_port(midi_in: &MidiInput, pattern: &str) -> Option<(MidiInputPort, String)> {
        for port in midi_in.ports() {
            if let Ok(name) = midi_in.port_name(&port) {
                if name_matches(&name, pattern) {
                    debug!("Found port '{}' matching pattern '{}'", name, pattern);
                    return Some((port, name));
                }
            }
        }
        None
    }

    /// Scans for the target endpoint and starts listening to it.
    pub fn connect(&mut self) -> Result<()> {
        self.disconnect();

        let mut midi_in = MidiInput::new("push2-hw")?;
        midi_in.ignore(Ignore::None);

        let (port, port_name) = Self::find_port(&midi_in, &self.pattern)
            .ok_or_else(|| Error::InputPortNotFound(self.pattern.clone()))?;

        info!("Connecting to input port: {}", port_name);

        let callback = self.callback.clone();
        let conn = midi_in
            .connect(
                &port,
                "push2-hw-input",
                move |timestamp_us, data, _| {
                    let event = MidiEvent {
                        timestamp: timestamp_us as f64 / 1_000_000.0,
                        data: data.to_vec(),
                    };
                    if let Some(cb) = callback.lock().unwrap().as_mut() {
                        cb(event);
                    }
                },
                (),
            )
            .map_err(|e| Error::MidiConnect(e.to_string()))?;

        self.conn = Some(conn);
        self.port_name = Some(port_name);
        Ok(())
    }

    /// Closes the input connection, if any.
    pub fn disconnect(&mut self) {
        if self.conn.take().is_some() {
            info!("MIDI input disconnected");
        }
        self.port_name = None;
    }

    /// Returns true if an input port is open.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Returns the name of the connected port.
    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }
}

/// Case-insensitive substring match used for endpoint identification.
pub fn name_matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
