// Observer: subscribers register with an event manager per topic and are
// notified in registration order. The manager holds only weak references,
// so a dropped subscriber silently falls off the list.

use std::cell::RefCell;
use std::io;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::transcript::Transcript;

/// Topic whose payloads are delivered without a topic prefix.
pub const GENERAL: &str = "general";

pub trait Subscriber {
    fn name(&self) -> &str;
    fn notify(&self, topic: &str, payload: &str);
}

/// Records what it received so the demo can print deliveries in order.
pub struct Recorder {
    name: String,
    sink: Inbox,
}

impl Recorder {
    pub fn new(name: &str, sink: &Inbox) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            sink: Rc::clone(sink),
        })
    }
}

impl Subscriber for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, topic: &str, payload: &str) {
        let entry = match topic {
            GENERAL => payload.to_string(),
            _ => format!("[{topic}] {payload}"),
        };
        self.sink.borrow_mut().push((self.name.clone(), entry));
    }
}

#[derive(Default)]
pub struct EventManager {
    topics: IndexMap<String, Vec<Weak<dyn Subscriber>>>,
}

impl EventManager {
    pub fn subscribe(&mut self, topic: &str, subscriber: &Rc<dyn Subscriber>) {
        self.topics
            .entry(topic.to_string())
            .or_default()
            .push(Rc::downgrade(subscriber));
    }

    /// Removes exactly the given subscriber from the topic.
    pub fn unsubscribe(&mut self, topic: &str, subscriber: &Rc<dyn Subscriber>) {
        if let Some(list) = self.topics.get_mut(topic) {
            let target = Rc::downgrade(subscriber);
            list.retain(|weak| !Weak::ptr_eq(weak, &target));
        }
    }

    /// Notifies live subscribers in order and prunes dead ones. Returns the
    /// number notified.
    pub fn publish(&mut self, topic: &str, payload: &str) -> usize {
        let Some(list) = self.topics.get_mut(topic) else {
            return 0;
        };
        list.retain(|weak| weak.strong_count() > 0);
        let live: Vec<Rc<dyn Subscriber>> = list.iter().filter_map(Weak::upgrade).collect();
        for subscriber in &live {
            subscriber.notify(topic, payload);
        }
        live.len()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }
}

type Inbox = Rc<RefCell<Vec<(String, String)>>>;

fn flush(received: &Inbox, out: &mut Transcript<'_>) -> io::Result<()> {
    let delivered: Vec<_> = received.borrow_mut().drain(..).collect();
    for (name, entry) in delivered {
        out.line(&name, entry)?;
    }
    Ok(())
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let received = Rc::new(RefCell::new(Vec::new()));
    let mut events = EventManager::default();

    let first: Rc<dyn Subscriber> = Recorder::new("observer-1", &received);
    let second: Rc<dyn Subscriber> = Recorder::new("observer-2", &received);
    events.subscribe(GENERAL, &first);
    events.subscribe(GENERAL, &second);

    events.publish(GENERAL, "ping");
    flush(&received, out)?;

    events.unsubscribe(GENERAL, &first);
    events.publish(GENERAL, "pong");
    flush(&received, out)?;

    // Topic subscriptions, and pruning of a dropped subscriber.
    let auditor: Rc<dyn Subscriber> = Recorder::new("auditor", &received);
    events.subscribe("orders", &first);
    events.subscribe("orders", &auditor);
    events.publish("orders", "order #1 placed");
    flush(&received, out)?;
    out.line("orders.subscribers", events.subscriber_count("orders"))?;

    drop(auditor);
    let notified = events.publish("orders", "order #2 placed");
    flush(&received, out)?;
    out.line("orders.notified", notified)?;
    out.line("orders.subscribers", events.subscriber_count("orders"))?;
    out.line("unknown-topic.notified", events.publish("payments", "refund"))?;
    Ok(())
}
