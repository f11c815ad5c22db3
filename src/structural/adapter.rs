// Adapter: third-party playback engines with their own method names are
// wrapped so client code can keep calling `MediaPlayer::play`.

use std::io;

use crate::transcript::Transcript;

// ============================================================================
// Example: Object adapters with trait objects
// ============================================================================

/// Target interface the client is written against.
pub trait MediaPlayer {
    fn play(&self, filename: &str) -> String;
}

/// Incompatible engine: different method name and argument shape.
pub struct VlcEngine;
impl VlcEngine {
    pub fn play_vlc(&self, path: &str) -> String {
        format!("vlc engine streaming {path}")
    }
}

pub struct FfmpegEngine;
impl FfmpegEngine {
    pub fn decode(&self, path: &str, container: &str) -> String {
        format!("ffmpeg decoding {container} container {path}")
    }
}

pub struct VlcAdapter {
    engine: VlcEngine,
}

impl MediaPlayer for VlcAdapter {
    fn play(&self, filename: &str) -> String {
        self.engine.play_vlc(filename)
    }
}

pub struct FfmpegAdapter {
    engine: FfmpegEngine,
}

impl MediaPlayer for FfmpegAdapter {
    fn play(&self, filename: &str) -> String {
        let container = extension(filename).unwrap_or("raw");
        self.engine.decode(filename, container)
    }
}

fn extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

/// Front player: plays mp3 itself, routes other formats to an adapter.
pub struct AudioPlayer {
    vlc: VlcAdapter,
    ffmpeg: FfmpegAdapter,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self {
            vlc: VlcAdapter { engine: VlcEngine },
            ffmpeg: FfmpegAdapter {
                engine: FfmpegEngine,
            },
        }
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPlayer for AudioPlayer {
    fn play(&self, filename: &str) -> String {
        match extension(filename) {
            Some("mp3") => format!("built-in decoder playing {filename}"),
            Some("vlc") => self.vlc.play(filename),
            Some("mkv" | "mp4") => self.ffmpeg.play(filename),
            Some(other) => format!("unsupported format {other}"),
            None => format!("unsupported format for {filename}"),
        }
    }
}

// ============================================================================
// Example: Zero-cost adapter with generics
// ============================================================================

pub trait PlaysVlc {
    fn play_vlc(&self, path: &str) -> String;
}

impl PlaysVlc for VlcEngine {
    fn play_vlc(&self, path: &str) -> String {
        VlcEngine::play_vlc(self, path)
    }
}

pub struct GenericAdapter<T> {
    inner: T,
}

impl<T: PlaysVlc> MediaPlayer for GenericAdapter<T> {
    fn play(&self, filename: &str) -> String {
        self.inner.play_vlc(filename)
    }
}

/// Client code: only knows the target interface.
fn play_all(player: &dyn MediaPlayer, files: &[&str], out: &mut Transcript<'_>) -> io::Result<()> {
    for file in files {
        out.line("play", player.play(file))?;
    }
    Ok(())
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let player = AudioPlayer::new();
    play_all(
        &player,
        &["song.mp3", "movie.vlc", "video.mkv", "clip.mp4", "unknown.avi"],
        out,
    )?;

    let generic = GenericAdapter { inner: VlcEngine };
    out.line("generic", generic.play("concert.vlc"))?;
    Ok(())
}
