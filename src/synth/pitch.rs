use std::fmt;

/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// A frequency quantized to whole millihertz.
///
/// Voices are looked up by this key instead of by a float, so two
/// computations of "the same" frequency land on the same voice as long as
/// they agree to within half a millihertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchId(u32);

impl PitchId {
    pub fn from_hz(hz: f32) -> Self {
        Self((hz as f64 * 1000.0).round().max(0.0) as u32)
    }

    pub fn from_midi(note: u8) -> Self {
        Self::from_hz(midi_note_to_freq(note))
    }

    pub fn millihertz(self) -> u32 {
        self.0
    }

    pub fn hz(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for PitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} Hz", self.hz())
    }
}
