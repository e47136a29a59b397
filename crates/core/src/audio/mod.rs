use crate::Result;

/// Background music control. Playback only; volume is the demo's 0..=255
/// scale and backends map it onto whatever their mixer uses.
pub trait MusicPlayer {
    /// Starts the loaded track, looping forever.
    fn play_looping(&mut self) -> Result<()>;

    fn set_volume(&mut self, volume: u8);

    fn volume(&self) -> u8;

    /// Plays the one-shot intro sound once, if the backend loaded one.
    fn play_sample(&mut self) -> Result<()>;
}

/// Rescales a 0..=255 volume onto a mixer whose maximum is `mixer_max`.
pub fn scale_volume(volume: u8, mixer_max: i32) -> i32 {
    (i32::from(volume) * mixer_max + 127) / 255
}

/// Player for runs without an audio device. Remembers every volume change so
/// fades can be inspected afterwards.
#[derive(Debug, Clone)]
pub struct SilentPlayer {
    playing: bool,
    volume: u8,
    history: Vec<u8>,
    samples_played: u32,
}

impl Default for SilentPlayer {
    fn default() -> Self {
        Self {
            playing: false,
            volume: 255,
            history: Vec::new(),
            samples_played: 0,
        }
    }
}

impl SilentPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn history(&self) -> &[u8] {
        &self.history
    }

    pub fn samples_played(&self) -> u32 {
        self.samples_played
    }
}

impl MusicPlayer for SilentPlayer {
    fn play_looping(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
        self.history.push(volume);
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn play_sample(&mut self) -> Result<()> {
        self.samples_played += 1;
        Ok(())
    }
}
