use serde::{Deserialize, Serialize};
#[cfg(feature = "rodio_backend")]
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CueConfig {
    #[serde(default = "default_audio")]
    pub audio: bool,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_audio() -> bool {
    true
}

fn default_volume() -> f32 {
    0.2
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            audio: default_audio(),
            volume: default_volume(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Start,
    Pause,
    Reset,
    Lap,
}

impl Cue {
    /// Tone frequency in Hz and length in milliseconds.
    pub fn tone(self) -> (f32, u64) {
        match self {
            Cue::Start => (800.0, 100),
            Cue::Pause => (400.0, 100),
            Cue::Reset => (300.0, 200),
            Cue::Lap => (1200.0, 50),
        }
    }
}

/// Plays short feedback tones. Silent (log only) unless built with
/// `rodio_backend` and an output device is available.
pub struct Beeper {
    config: CueConfig,
    #[cfg(feature = "rodio_backend")]
    output: Option<(rodio::OutputStream, rodio::OutputStreamHandle)>,
}

impl Beeper {
    pub fn new(config: CueConfig) -> Self {
        #[cfg(feature = "rodio_backend")]
        let output = if config.audio {
            match rodio::OutputStream::try_default() {
                Ok(output) => Some(output),
                Err(e) => {
                    log::warn!("no audio output, cues disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            config,
            #[cfg(feature = "rodio_backend")]
            output,
        }
    }

    /// True only when cues are switched on and something can play them.
    pub fn is_enabled(&self) -> bool {
        self.config.audio && self.has_output()
    }

    #[cfg(feature = "rodio_backend")]
    fn has_output(&self) -> bool {
        self.output.is_some()
    }

    #[cfg(not(feature = "rodio_backend"))]
    fn has_output(&self) -> bool {
        false
    }

    pub fn play(&self, cue: Cue) {
        if !self.config.audio {
            return;
        }
        let (freq, dur_ms) = cue.tone();
        log::debug!("cue {:?}: {} Hz for {} ms", cue, freq, dur_ms);

        self.emit(cue, freq, dur_ms);
    }

    #[cfg(feature = "rodio_backend")]
    fn emit(&self, cue: Cue, freq: f32, dur_ms: u64) {
        use rodio::Source;

        let Some((_, handle)) = &self.output else {
            return;
        };
        match rodio::Sink::try_new(handle) {
            Ok(sink) => {
                let tone = rodio::source::SineWave::new(freq)
                    .take_duration(Duration::from_millis(dur_ms))
                    .amplify(self.config.volume);
                sink.append(tone);
                sink.detach();
            }
            Err(e) => log::warn!("failed to play cue {:?}: {}", cue, e),
        }
    }

    #[cfg(not(feature = "rodio_backend"))]
    fn emit(&self, _cue: Cue, _freq: f32, _dur_ms: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_tones() {
        assert_eq!(Cue::Start.tone(), (800.0, 100));
        assert_eq!(Cue::Pause.tone(), (400.0, 100));
        assert_eq!(Cue::Reset.tone(), (300.0, 200));
        assert_eq!(Cue::Lap.tone(), (1200.0, 50));
    }

    #[test]
    fn test_muted_beeper_is_silent() {
        let beeper = Beeper::new(CueConfig { audio: false, volume: 0.5 });
        assert!(!beeper.is_enabled());
        beeper.play(Cue::Lap);
    }

    #[cfg(not(feature = "rodio_backend"))]
    #[test]
    fn test_no_backend_reports_sound_off() {
        let beeper = Beeper::new(CueConfig::default());
        assert!(!beeper.is_enabled());
    }
}
