// Purpose - external interfaces: the score coming in, samples going out

pub mod score;

pub use score::{Score, ScoreNote, ScoreTrack, PERCUSSION_CHANNEL};

/// Destination for mixed samples (device stream, file writer, test capture).
pub trait AudioSink {
    fn write_sample(&mut self, sample: f32);
}

impl AudioSink for Vec<f32> {
    fn write_sample(&mut self, sample: f32) {
        self.push(sample);
    }
}

/// Feed a realtime consumer; samples are dropped when the ring is full.
#[cfg(feature = "rtrb")]
impl AudioSink for rtrb::Producer<f32> {
    fn write_sample(&mut self, sample: f32) {
        let _ = self.push(sample);
    }
}

#[cfg(all(test, feature = "rtrb"))]
mod tests {
    use super::*;

    #[test]
    fn ring_sink_drops_when_full() {
        let (mut tx, mut rx) = rtrb::RingBuffer::<f32>::new(2);
        for s in [0.1, 0.2, 0.3] {
            tx.write_sample(s);
        }
        assert_eq!(rx.pop().ok(), Some(0.1));
        assert_eq!(rx.pop().ok(), Some(0.2));
        assert!(rx.pop().is_err());
    }
}
