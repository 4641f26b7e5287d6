//! Player - device setup and the control loop

use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use wavebake::{
    io::Score, synth::message::trigger_queue, Engine, Scheduler, Settings, MAX_BLOCK_SIZE,
};

/// Triggers in flight between the control loop and the audio callback.
const QUEUE_CAPACITY: usize = 1024;
/// Time left for release tails after the last note.
const TAIL: Duration = Duration::from_secs(2);

pub struct Player {
    score: Score,
}

impl Player {
    pub fn new(score: Score) -> Self {
        Self { score }
    }

    /// Render voices, open the device and play the score to the end.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        tracing::info!(sample_rate, channels, "output device ready");

        let settings = Settings::with_sample_rate(sample_rate)?;
        let mut engine =
            Engine::from_score(&self.score, settings).wrap_err("failed to render voices")?;
        let (mut tx, rx) = trigger_queue(QUEUE_CAPACITY);
        engine.attach_queue(rx);

        // The callback owns the engine; only queued triggers reach it.
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for frames in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let block = &mut render_buf[..frames.len() / channels];
                    engine.render_block(block);

                    // Copy to output (mono to all channels)
                    for (frame, &s) in frames.chunks_mut(channels).zip(block.iter()) {
                        frame.fill(s);
                    }
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;
        stream.play()?;

        let mut scheduler = Scheduler::new(&self.score);
        let end = Duration::from_micros(self.score.duration_micros()) + TAIL;
        let start = Instant::now();

        while start.elapsed() < end {
            let elapsed = start.elapsed().as_micros() as u64;
            scheduler.dispatch(elapsed, |track, trigger| tx.send(track, trigger))?;
            std::thread::sleep(Duration::from_millis(1));
        }

        tracing::info!("score finished");
        Ok(())
    }
}
