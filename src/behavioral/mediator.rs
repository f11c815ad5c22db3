// Mediator: chat participants only know the room. The room owns every
// member in an arena and routes each message by handle.

use std::io;

use crate::transcript::Transcript;

/// Index into the room's arena. Handles stay valid after other members leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberId(usize);

#[derive(Debug)]
struct Member {
    name: String,
    inbox: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ChatRoom {
    members: Vec<Option<Member>>,
    log: Vec<String>,
}

impl ChatRoom {
    pub fn join(&mut self, name: &str) -> MemberId {
        let id = MemberId(self.members.len());
        self.members.push(Some(Member {
            name: name.to_string(),
            inbox: Vec::new(),
        }));
        self.log.push(format!("{name} joined"));
        id
    }

    pub fn leave(&mut self, id: MemberId) {
        if let Some(member) = self.members.get_mut(id.0).and_then(Option::take) {
            self.log.push(format!("{} left", member.name));
        }
    }

    fn name(&self, id: MemberId) -> Option<&str> {
        self.members
            .get(id.0)?
            .as_ref()
            .map(|member| member.name.as_str())
    }

    pub fn broadcast(&mut self, from: MemberId, text: &str) {
        let Some(sender) = self.name(from).map(str::to_string) else {
            return;
        };
        self.log.push(format!("{sender} -> all: {text}"));
        for (index, slot) in self.members.iter_mut().enumerate() {
            if let Some(member) = slot {
                if index != from.0 {
                    member.inbox.push(format!("{sender}: {text}"));
                }
            }
        }
    }

    /// Returns false when the recipient is not in the room.
    pub fn send_private(&mut self, from: MemberId, to: &str, text: &str) -> bool {
        let Some(sender) = self.name(from).map(str::to_string) else {
            return false;
        };
        let recipient = self
            .members
            .iter_mut()
            .flatten()
            .find(|member| member.name == to);
        match recipient {
            Some(member) => {
                member.inbox.push(format!("(private) {sender}: {text}"));
                self.log.push(format!("{sender} -> {to}: {text}"));
                true
            }
            None => {
                self.log.push(format!("{sender} -> {to}: undeliverable"));
                false
            }
        }
    }

    pub fn inbox(&self, id: MemberId) -> &[String] {
        self.members
            .get(id.0)
            .and_then(Option::as_ref)
            .map_or(&[][..], |member| member.inbox.as_slice())
    }

    pub fn drain_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

/// Colleague: holds its own handle, never another member.
pub struct User {
    id: MemberId,
}

impl User {
    pub fn join(room: &mut ChatRoom, name: &str) -> Self {
        Self {
            id: room.join(name),
        }
    }

    pub fn say(&self, room: &mut ChatRoom, text: &str) {
        room.broadcast(self.id, text);
    }

    pub fn whisper(&self, room: &mut ChatRoom, to: &str, text: &str) -> bool {
        room.send_private(self.id, to, text)
    }

    pub fn leave(self, room: &mut ChatRoom) {
        room.leave(self.id);
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let mut room = ChatRoom::default();
    let alice = User::join(&mut room, "alice");
    let bob = User::join(&mut room, "bob");
    let carol = User::join(&mut room, "carol");

    alice.say(&mut room, "hi everyone");
    bob.whisper(&mut room, "alice", "lunch?");
    carol.whisper(&mut room, "dave", "are you there?");
    let carol_id = carol.id;
    carol.leave(&mut room);
    bob.say(&mut room, "carol left early");

    for entry in room.drain_log() {
        out.line("mediator", entry)?;
    }
    for (name, id) in [("alice", alice.id), ("bob", bob.id), ("carol", carol_id)] {
        let inbox = room.inbox(id);
        if inbox.is_empty() {
            out.line(&format!("inbox.{name}"), "(none)")?;
        }
        for message in inbox {
            out.line(&format!("inbox.{name}"), message)?;
        }
    }
    Ok(())
}
