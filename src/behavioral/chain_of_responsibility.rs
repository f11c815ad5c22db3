// Chain of Responsibility: a purchase request travels up an approval chain
// until someone with enough authority handles it.

use std::io;

use crate::transcript::Transcript;

#[derive(Debug, Clone)]
pub struct Request {
    pub id: u32,
    pub amount: u32,
    pub purpose: String,
}

impl Request {
    pub fn new(id: u32, amount: u32, purpose: &str) -> Self {
        Self {
            id,
            amount,
            purpose: purpose.to_string(),
        }
    }
}

// ============================================================================
// Example: Linked handlers with trait objects
// ============================================================================

pub trait Approver {
    fn title(&self) -> &str;
    fn can_approve(&self, request: &Request) -> bool;
    fn next(&self) -> Option<&dyn Approver>;

    /// Returns the title of the handler, or `None` if the chain ran out.
    fn handle(&self, request: &Request) -> Option<&str> {
        if self.can_approve(request) {
            return Some(self.title());
        }
        self.next()?.handle(request)
    }
}

pub struct Approval {
    title: String,
    limit: u32,
    next: Option<Box<dyn Approver>>,
}

impl Approval {
    pub fn new(title: &str, limit: u32) -> Self {
        Self {
            title: title.to_string(),
            limit,
            next: None,
        }
    }

    pub fn then(mut self, next: impl Approver + 'static) -> Self {
        self.next = Some(Box::new(next));
        self
    }
}

impl Approver for Approval {
    fn title(&self) -> &str {
        &self.title
    }

    fn can_approve(&self, request: &Request) -> bool {
        request.amount <= self.limit
    }

    fn next(&self) -> Option<&dyn Approver> {
        self.next.as_deref()
    }
}

pub fn approval_chain() -> Approval {
    Approval::new("team-lead", 1_000)
        .then(Approval::new("manager", 5_000).then(Approval::new("director", 20_000)))
}

// ============================================================================
// Example: Log level chain with closures
// ============================================================================

type Handler = Box<dyn Fn(u8, &str) -> Option<String>>;

fn log_chain() -> Vec<Handler> {
    vec![
        Box::new(|level: u8, msg: &str| (level <= 1).then(|| format!("console {msg}"))) as Handler,
        Box::new(|level: u8, msg: &str| (level <= 2).then(|| format!("file {msg}"))) as Handler,
        Box::new(|_: u8, msg: &str| Some(format!("pager {msg}"))) as Handler,
    ]
}

fn dispatch(chain: &[Handler], level: u8, msg: &str) -> Option<String> {
    chain.iter().find_map(|handler| handler(level, msg))
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let chain = approval_chain();
    let requests = [
        Request::new(1, 500, "office supplies"),
        Request::new(2, 3_500, "conference travel"),
        Request::new(3, 15_000, "new servers"),
        Request::new(4, 50_000, "acquisition"),
    ];
    for request in &requests {
        let tag = format!("request-{}", request.id);
        match chain.handle(request) {
            Some(title) => out.line(
                &tag,
                format!("{} ({}) approved by {title}", request.amount, request.purpose),
            )?,
            None => out.line(
                &tag,
                format!("{} ({}) unhandled", request.amount, request.purpose),
            )?,
        }
    }

    let loggers = log_chain();
    for (level, msg) in [(1, "debug trace"), (2, "disk low"), (3, "outage")] {
        if let Some(handled) = dispatch(&loggers, level, msg) {
            out.line(&format!("log-level-{level}"), handled)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;

    #[test]
    fn test_first_capable_handler_wins() {
        let chain = approval_chain();
        assert_eq!(chain.handle(&Request::new(1, 1_000, "x")), Some("team-lead"));
        assert_eq!(chain.handle(&Request::new(2, 1_001, "x")), Some("manager"));
        assert_eq!(chain.handle(&Request::new(3, 20_000, "x")), Some("director"));
    }

    #[test]
    fn test_unhandled_when_chain_exhausted() {
        let chain = approval_chain();
        assert_eq!(chain.handle(&Request::new(4, 20_001, "x")), None);
    }

    #[test]
    fn test_closure_chain() {
        let chain = log_chain();
        assert_eq!(dispatch(&chain, 2, "m").as_deref(), Some("file m"));
        assert_eq!(dispatch(&chain, 9, "m").as_deref(), Some("pager m"));
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("request-2: 3500 (conference travel) approved by manager\n"));
        assert!(text.contains("request-4: 50000 (acquisition) unhandled\n"));
    }
}
