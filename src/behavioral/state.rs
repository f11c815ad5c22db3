// State: a media player delegates every button press to its current state
// object. The same press does different things depending on that state.
//
//   stopped --play--> playing --pause--> paused --play--> playing
//      ^                 |                  |
//      +------stop-------+-------stop-------+

use std::io;

use crate::transcript::Transcript;

pub trait PlayerState {
    fn name(&self) -> &'static str;
    fn play(self: Box<Self>, track: &mut Track) -> (Box<dyn PlayerState>, String);
    fn pause(self: Box<Self>, track: &mut Track) -> (Box<dyn PlayerState>, String);
    fn stop(self: Box<Self>, track: &mut Track) -> (Box<dyn PlayerState>, String);
}

/// Context data the states act on.
#[derive(Debug, Default)]
pub struct Track {
    title: String,
    position_secs: u32,
}

impl Track {
    fn position(&self) -> String {
        format!("{}:{:02}", self.position_secs / 60, self.position_secs % 60)
    }
}

pub struct Stopped;
pub struct Playing;
pub struct Paused;

impl PlayerState for Stopped {
    fn name(&self) -> &'static str {
        "stopped"
    }

    fn play(self: Box<Self>, track: &mut Track) -> (Box<dyn PlayerState>, String) {
        track.position_secs = 0;
        (Box::new(Playing), format!("start {} from the beginning", track.title))
    }

    fn pause(self: Box<Self>, _track: &mut Track) -> (Box<dyn PlayerState>, String) {
        (self, "nothing to pause".to_string())
    }

    fn stop(self: Box<Self>, _track: &mut Track) -> (Box<dyn PlayerState>, String) {
        (self, "already stopped".to_string())
    }
}

impl PlayerState for Playing {
    fn name(&self) -> &'static str {
        "playing"
    }

    fn play(self: Box<Self>, _track: &mut Track) -> (Box<dyn PlayerState>, String) {
        (self, "already playing".to_string())
    }

    fn pause(self: Box<Self>, track: &mut Track) -> (Box<dyn PlayerState>, String) {
        (Box::new(Paused), format!("pause at {}", track.position()))
    }

    fn stop(self: Box<Self>, track: &mut Track) -> (Box<dyn PlayerState>, String) {
        track.position_secs = 0;
        (Box::new(Stopped), "stop and rewind".to_string())
    }
}

impl PlayerState for Paused {
    fn name(&self) -> &'static str {
        "paused"
    }

    fn play(self: Box<Self>, track: &mut Track) -> (Box<dyn PlayerState>, String) {
        (Box::new(Playing), format!("resume from {}", track.position()))
    }

    fn pause(self: Box<Self>, _track: &mut Track) -> (Box<dyn PlayerState>, String) {
        (self, "already paused".to_string())
    }

    fn stop(self: Box<Self>, track: &mut Track) -> (Box<dyn PlayerState>, String) {
        track.position_secs = 0;
        (Box::new(Stopped), "stop from pause".to_string())
    }
}

pub struct MediaPlayer {
    // Only `None` for the duration of a transition.
    state: Option<Box<dyn PlayerState>>,
    track: Track,
}

#[derive(Debug, Clone, Copy)]
pub enum Button {
    Play,
    Pause,
    Stop,
}

impl Button {
    fn as_str(self) -> &'static str {
        match self {
            Button::Play => "play",
            Button::Pause => "pause",
            Button::Stop => "stop",
        }
    }
}

impl MediaPlayer {
    pub fn new(title: &str) -> Self {
        Self {
            state: Some(Box::new(Stopped)),
            track: Track {
                title: title.to_string(),
                position_secs: 0,
            },
        }
    }

    pub fn state(&self) -> &'static str {
        self.state.as_ref().map_or("stopped", |state| state.name())
    }

    /// Time passes only while playing.
    pub fn tick(&mut self, secs: u32) {
        if self.state() == "playing" {
            self.track.position_secs += secs;
        }
    }

    pub fn press(&mut self, button: Button) -> String {
        let current: Box<dyn PlayerState> = match self.state.take() {
            Some(state) => state,
            None => Box::new(Stopped),
        };
        let (next, message) = match button {
            Button::Play => current.play(&mut self.track),
            Button::Pause => current.pause(&mut self.track),
            Button::Stop => current.stop(&mut self.track),
        };
        self.state = Some(next);
        message
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let mut player = MediaPlayer::new("Blue in Green");
    let script = [
        (Button::Pause, 0),
        (Button::Play, 42),
        (Button::Play, 0),
        (Button::Pause, 30),
        (Button::Play, 15),
        (Button::Stop, 0),
        (Button::Stop, 0),
    ];
    for (button, elapsed) in script {
        let before = player.state();
        let message = player.press(button);
        out.line(
            &format!("{before}.{}", button.as_str()),
            format!("{message} -> {}", player.state()),
        )?;
        player.tick(elapsed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_same_press_depends_on_state() {
        let mut player = MediaPlayer::new("t");
        let from_stopped = player.press(Button::Play);
        player.tick(5);
        player.press(Button::Pause);
        let from_paused = player.press(Button::Play);
        assert_eq!(from_stopped, "start t from the beginning");
        assert_eq!(from_paused, "resume from 0:05");
        assert_ne!(from_stopped, from_paused);
    }

    #[test]
    fn test_cycle_returns_to_playing() {
        let mut player = MediaPlayer::new("t");
        for button in [Button::Play, Button::Pause, Button::Play] {
            player.press(button);
        }
        assert_eq!(player.state(), "playing");
        player.press(Button::Stop);
        assert_eq!(player.state(), "stopped");
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut player = MediaPlayer::new("t");
        player.press(Button::Play);
        player.tick(10);
        player.press(Button::Pause);
        player.tick(100);
        assert_eq!(player.press(Button::Play), "resume from 0:10");
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.starts_with("stopped.pause: nothing to pause -> stopped\n"));
        assert!(text.contains("stopped.play: start Blue in Green from the beginning -> playing\n"));
        assert!(text.contains("paused.play: resume from 0:42 -> playing\n"));
        assert!(text.ends_with("stopped.stop: already stopped -> stopped\n"));
    }
}
