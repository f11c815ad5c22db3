// Proxy: stand-ins with the same interface as an image. One defers the
// expensive load until first display, one checks the caller's role, one
// brackets every call with hooks.

use std::io;

use crate::transcript::Transcript;

/// Each call reports what happened, in order.
pub trait Image {
    fn display(&mut self) -> Vec<String>;
}

pub struct RealImage {
    filename: String,
}

impl RealImage {
    /// Loading is the expensive part.
    pub fn load(filename: &str, events: &mut Vec<String>) -> Self {
        events.push(format!("load {filename} from disk"));
        Self {
            filename: filename.to_string(),
        }
    }
}

impl Image for RealImage {
    fn display(&mut self) -> Vec<String> {
        vec![format!("display {}", self.filename)]
    }
}

// ============================================================================
// Example: Virtual proxy, lazy loading
// ============================================================================

pub struct LazyImage {
    filename: String,
    real: Option<RealImage>,
}

impl LazyImage {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            real: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.real.is_some()
    }
}

impl Image for LazyImage {
    fn display(&mut self) -> Vec<String> {
        let mut events = Vec::new();
        let filename = &self.filename;
        let real = self
            .real
            .get_or_insert_with(|| RealImage::load(filename, &mut events));
        events.extend(real.display());
        events
    }
}

// ============================================================================
// Example: Protection proxy
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Viewer,
    Guest,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Viewer => "viewer",
            Role::Guest => "guest",
        }
    }
}

pub struct ProtectedImage<I> {
    inner: I,
    role: Role,
}

impl<I: Image> ProtectedImage<I> {
    pub fn new(inner: I, role: Role) -> Self {
        Self { inner, role }
    }
}

impl<I: Image> Image for ProtectedImage<I> {
    fn display(&mut self) -> Vec<String> {
        match self.role {
            Role::Admin | Role::Viewer => self.inner.display(),
            Role::Guest => vec![format!("access denied for {}", self.role.as_str())],
        }
    }
}

// ============================================================================
// Example: Logging proxy with pre/post hooks
// ============================================================================

pub struct LoggedImage<I> {
    inner: I,
    calls: usize,
}

impl<I: Image> LoggedImage<I> {
    pub fn new(inner: I) -> Self {
        Self { inner, calls: 0 }
    }
}

impl<I: Image> Image for LoggedImage<I> {
    fn display(&mut self) -> Vec<String> {
        self.calls += 1;
        let mut events = vec![format!("before call {}", self.calls)];
        events.extend(self.inner.display());
        events.push(format!("after call {}", self.calls));
        events
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let mut photo = LoggedImage::new(LazyImage::new("photo.png"));
    out.check("loaded-before-first-call", photo.inner.is_loaded())?;
    for call in 1..=2 {
        for event in photo.display() {
            out.line(&format!("call-{call}"), event)?;
        }
    }

    for role in [Role::Admin, Role::Viewer, Role::Guest] {
        let mut secret = ProtectedImage::new(LazyImage::new("secret.png"), role);
        for event in secret.display() {
            out.line(role.as_str(), event)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_lazy_load_happens_once() {
        let mut image = LazyImage::new("a.png");
        assert!(!image.is_loaded());
        assert_eq!(image.display(), vec!["load a.png from disk", "display a.png"]);
        assert!(image.is_loaded());
        assert_eq!(image.display(), vec!["display a.png"]);
    }

    #[test]
    fn test_guest_never_triggers_load() {
        let mut image = ProtectedImage::new(LazyImage::new("b.png"), Role::Guest);
        assert_eq!(image.display(), vec!["access denied for guest"]);
        assert!(!image.inner.is_loaded());
    }

    #[test]
    fn test_hooks_bracket_each_call() {
        let mut image = LoggedImage::new(LazyImage::new("c.png"));
        image.display();
        let second = image.display();
        assert_eq!(second, vec!["before call 2", "display c.png", "after call 2"]);
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.starts_with("loaded-before-first-call: false\n"));
        assert_eq!(text.matches("load photo.png from disk").count(), 1);
        assert!(text.contains("viewer: display secret.png\n"));
        assert!(text.ends_with("guest: access denied for guest\n"));
    }
}
