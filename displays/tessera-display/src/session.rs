//! Display session
//!
//! A session owns the transport for its whole life. [`DisplaySession::open`]
//! replays an init script and watches what it configures; the session only
//! exists once the controller is on, in RGB565, and its surface size is
//! known. [`DisplaySession::commit`] then renders a scene in full and
//! streams it into the controller's frame memory.

use alloc::vec::Vec;

use tessera_core::init::{run_script, RecordObserver};
use tessera_core::{
    Compositor, ControllerEvent, ControllerState, DisplayConfig, Group, PanelConfig, PixelFormat,
    Scene,
};
use tessera_hal::DisplayBus;
use tessera_protocol::{opcodes, CommandRecord, Script};

use crate::error::SessionError;

/// Follows the controller through a script replay
#[derive(Debug)]
struct Negotiation {
    panel: PanelConfig,
    config: DisplayConfig,
    state: ControllerState,
}

impl Negotiation {
    fn new(panel: PanelConfig) -> Self {
        Self {
            panel,
            config: DisplayConfig::new(panel.width, panel.height),
            state: ControllerState::Unpowered,
        }
    }

    fn apply(&mut self, event: ControllerEvent) {
        if matches!(
            event,
            ControllerEvent::HardwareReset | ControllerEvent::SoftwareReset
        ) {
            // Reset restores the power-on format and orientation
            self.config = DisplayConfig::new(self.panel.width, self.panel.height);
        }

        let next = self.state.transition(event);
        if next != self.state {
            #[cfg(feature = "defmt")]
            defmt::debug!("session: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

impl RecordObserver for Negotiation {
    fn record_sent(&mut self, _index: usize, record: &CommandRecord<'_>) {
        if let Some(event) = ControllerEvent::from_record(record) {
            self.apply(event);
        }
        self.config.observe(record);
        if self.config.is_configured() {
            self.apply(ControllerEvent::FormatAndOrientationSet);
        }
    }
}

/// An initialized display
pub struct DisplaySession<B: DisplayBus> {
    bus: B,
    panel: PanelConfig,
    config: DisplayConfig,
    state: ControllerState,
    compositor: Compositor,
    /// Wire bytes of the frame being committed
    frame: Vec<u8>,
}

impl<B: DisplayBus> DisplaySession<B> {
    /// Bring the controller up
    ///
    /// Pulses the hardware reset line if the transport has one, then
    /// replays `script`. Fails unless the script leaves the display on
    /// with a 16-bit RGB565 interface format. On failure the transport is
    /// dropped; pass `&mut bus` to keep it.
    pub fn open(script: Script<'_>, mut bus: B, panel: PanelConfig) -> Result<Self, SessionError> {
        let mut negotiation = Negotiation::new(panel);

        if bus.hardware_reset()? {
            negotiation.apply(ControllerEvent::HardwareReset);
        }

        let sent = run_script(&mut bus, script, panel.delay_encoding, &mut negotiation)?;

        let Negotiation { config, state, .. } = negotiation;
        if !state.accepts_pixels() {
            #[cfg(feature = "defmt")]
            defmt::warn!("session: script ended in {:?}", state);
            return Err(SessionError::Incomplete(state));
        }
        if config.pixel_format != Some(PixelFormat::Rgb565) {
            return Err(SessionError::UnsupportedPixelFormat(config.pixel_format));
        }
        window(&panel, config.width(), config.height())?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "session: open after {} records, {}x{}",
            sent,
            config.width(),
            config.height()
        );
        #[cfg(not(feature = "defmt"))]
        let _ = sent;

        Ok(Self {
            bus,
            panel,
            config,
            state,
            compositor: Compositor::new(panel.background),
            frame: Vec::new(),
        })
    }

    /// Configuration the script established
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Panel description the session was opened with
    pub fn panel(&self) -> &PanelConfig {
        &self.panel
    }

    /// Controller lifecycle state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Surface width in the configured orientation
    pub fn width(&self) -> u16 {
        self.config.width()
    }

    /// Surface height in the configured orientation
    pub fn height(&self) -> u16 {
        self.config.height()
    }

    /// The transport
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// The transport, for commands outside the frame path
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Render `root` and send the frame
    ///
    /// The frame is composed in full before anything is written, so a
    /// compose error leaves the bus untouched. A transport error may leave
    /// a partial frame on the panel; committing again rewrites all of it.
    pub fn commit(&mut self, scene: &Scene, root: &Group) -> Result<(), SessionError> {
        let width = self.config.width();
        let height = self.config.height();
        let addresses = window(&self.panel, width, height)?;

        self.frame.resize(self.config.pixel_count() * 2, 0);
        self.compositor.render_frame_bytes(
            scene,
            root,
            width,
            height,
            self.panel.byte_order,
            &mut self.frame,
        )?;

        let Some((columns, rows)) = addresses else {
            return Ok(());
        };

        self.bus.write_command(opcodes::CASET)?;
        self.bus.write_data(&columns)?;
        self.bus.write_command(opcodes::RASET)?;
        self.bus.write_data(&rows)?;
        self.bus.write_command(opcodes::RAMWR)?;

        let chunk_len = self.panel.chunk_rows.max(1) as usize * width as usize * 2;
        for chunk in self.frame.chunks(chunk_len) {
            self.bus.write_data(chunk)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("session: frame committed ({} bytes)", self.frame.len());

        Ok(())
    }

    /// Give the transport back
    pub fn release(self) -> B {
        self.bus
    }

}

/// `CASET` and `RASET` parameters for a full-surface window
///
/// `None` for an empty surface.
fn window(
    panel: &PanelConfig,
    width: u16,
    height: u16,
) -> Result<Option<([u8; 4], [u8; 4])>, SessionError> {
    if width == 0 || height == 0 {
        return Ok(None);
    }
    let x0 = panel.column_offset;
    let y0 = panel.row_offset;
    let x1 = x0
        .checked_add(width - 1)
        .ok_or(SessionError::WindowOutOfRange)?;
    let y1 = y0
        .checked_add(height - 1)
        .ok_or(SessionError::WindowOutOfRange)?;
    Ok(Some((address_range(x0, x1), address_range(y0, y1))))
}

/// `CASET`/`RASET` parameters: start and end, high byte first
fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}
