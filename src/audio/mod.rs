//! Sound effects.
//!
//! The game only needs one effect, a short "bling" when a diamond is
//! collected. Without the `audio` feature it rings the terminal bell.

use std::io::{self, Write};

/// Number of effects allowed to play at once.
pub const MAX_STREAMS: usize = 5;

const SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Bling,
}

/// Per-play parameters. `loop_count` is the number of extra repeats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayParams {
    pub left_volume: f32,
    pub right_volume: f32,
    pub priority: i32,
    pub loop_count: i32,
    pub rate: f32,
}

impl Default for PlayParams {
    fn default() -> Self {
        Self {
            left_volume: 0.5,
            right_volume: 0.5,
            priority: 1,
            loop_count: 0,
            rate: 1.0,
        }
    }
}

/// Anything that can play a sound effect. Playback is fire-and-forget.
pub trait SoundSink: Send {
    fn play(&mut self, effect: SoundEffect, params: PlayParams);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&mut self, _effect: SoundEffect, _params: PlayParams) {}
}

/// Rings the terminal bell.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play(&mut self, _effect: SoundEffect, _params: PlayParams) {
        let mut out = io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            log::warn!("terminal bell failed: {e}");
        }
    }
}

/// Remembers what was played. Used by tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<(SoundEffect, PlayParams)>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect, params: PlayParams) {
        self.played.push((effect, params));
    }
}

/// Pick the sink for this run. Falls back to the bell when no audio device
/// can be opened.
pub fn default_sink(enabled: bool) -> Box<dyn SoundSink> {
    if !enabled {
        return Box::new(SilentSink);
    }

    #[cfg(feature = "audio")]
    {
        match rodio_sink::RodioSink::new() {
            Ok(sink) => return Box::new(sink),
            Err(e) => log::warn!("audio output unavailable, using terminal bell: {e}"),
        }
    }

    Box::new(TerminalBell)
}

/// Interleaved stereo samples for an effect.
///
/// The bling is two short sine notes with an exponential fade. `rate`
/// scales the pitch and shortens the effect to match.
pub fn effect_samples(effect: SoundEffect, params: &PlayParams) -> Vec<f32> {
    let (notes, note_secs): (&[f32], f32) = match effect {
        SoundEffect::Bling => (&[1320.0, 1760.0], 0.07),
    };

    let rate = if params.rate > 0.0 { params.rate } else { 1.0 };
    let note_len = (SAMPLE_RATE as f32 * note_secs / rate) as usize;
    let repeats = params.loop_count.max(0) as usize + 1;

    let mut samples = Vec::with_capacity(note_len * notes.len() * repeats * 2);
    for _ in 0..repeats {
        for &freq in notes {
            for i in 0..note_len {
                let t = i as f32 / SAMPLE_RATE as f32;
                let envelope = (-t * 40.0 * rate).exp();
                let value =
                    (2.0 * std::f32::consts::PI * freq * rate * t).sin() * envelope * 0.3;
                samples.push(value * params.left_volume);
                samples.push(value * params.right_volume);
            }
        }
    }
    samples
}

#[cfg(feature = "audio")]
mod rodio_sink {
    use super::{effect_samples, PlayParams, SoundEffect, SoundSink, MAX_STREAMS, SAMPLE_RATE};
    use rodio::{buffer::SamplesBuffer, OutputStream, Sink};
    use std::io;
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::thread;

    /// Plays effects through the default output device.
    ///
    /// The output stream cannot leave the thread that opened it, so a small
    /// audio thread owns it and receives play requests over a channel.
    pub struct RodioSink {
        requests: Sender<(SoundEffect, PlayParams)>,
    }

    impl RodioSink {
        pub fn new() -> io::Result<Self> {
            let (requests, rx) = mpsc::channel();
            let (ready_tx, ready_rx) = mpsc::channel();

            thread::Builder::new()
                .name("lander-audio".to_string())
                .spawn(move || match OutputStream::try_default() {
                    Ok((_stream, handle)) => {
                        let _ = ready_tx.send(Ok(()));
                        run(rx, |samples| {
                            let sink = Sink::try_new(&handle).ok()?;
                            sink.append(SamplesBuffer::new(2, SAMPLE_RATE, samples));
                            Some(sink)
                        });
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                    }
                })?;

            match ready_rx.recv() {
                Ok(Ok(())) => Ok(Self { requests }),
                Ok(Err(msg)) => Err(io::Error::new(io::ErrorKind::NotFound, msg)),
                Err(e) => Err(io::Error::new(io::ErrorKind::BrokenPipe, e)),
            }
        }
    }

    fn run<F>(rx: Receiver<(SoundEffect, PlayParams)>, mut open: F)
    where
        F: FnMut(Vec<f32>) -> Option<Sink>,
    {
        let mut active: Vec<Sink> = Vec::new();
        while let Ok((effect, params)) = rx.recv() {
            active.retain(|sink| !sink.empty());
            if active.len() >= MAX_STREAMS {
                log::debug!("dropping {effect:?}, {MAX_STREAMS} streams busy");
                continue;
            }
            if let Some(sink) = open(effect_samples(effect, &params)) {
                active.push(sink);
            }
        }
    }

    impl SoundSink for RodioSink {
        fn play(&mut self, effect: SoundEffect, params: PlayParams) {
            if self.requests.send((effect, params)).is_err() {
                log::warn!("audio thread is gone, {effect:?} not played");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = PlayParams::default();
        assert!((params.left_volume - 0.5).abs() < f32::EPSILON);
        assert!((params.right_volume - 0.5).abs() < f32::EPSILON);
        assert_eq!(params.priority, 1);
        assert_eq!(params.loop_count, 0);
        assert!((params.rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_samples_are_stereo_and_bounded() {
        let samples = effect_samples(SoundEffect::Bling, &PlayParams::default());
        assert!(!samples.is_empty());
        assert_eq!(samples.len() % 2, 0);
        assert!(samples.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn test_loop_count_repeats() {
        let once = effect_samples(SoundEffect::Bling, &PlayParams::default());
        let twice = effect_samples(
            SoundEffect::Bling,
            &PlayParams {
                loop_count: 1,
                ..PlayParams::default()
            },
        );
        assert_eq!(twice.len(), once.len() * 2);
    }

    #[test]
    fn test_channel_volumes() {
        let params = PlayParams {
            left_volume: 1.0,
            right_volume: 0.0,
            ..PlayParams::default()
        };
        let samples = effect_samples(SoundEffect::Bling, &params);
        assert!(samples.iter().skip(1).step_by(2).all(|s| *s == 0.0));
        assert!(samples.iter().step_by(2).any(|s| *s != 0.0));
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::default();
        sink.play(SoundEffect::Bling, PlayParams::default());
        assert_eq!(sink.played.len(), 1);
        assert_eq!(sink.played[0].0, SoundEffect::Bling);
    }

    #[test]
    fn test_disabled_sound_is_silent() {
        let mut sink = default_sink(false);
        // Must not write anything or panic
        sink.play(SoundEffect::Bling, PlayParams::default());
    }
}
