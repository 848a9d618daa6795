//! Traversal events and the listener registry that delivers them.

use std::fmt;
use std::str::FromStr;

use fnv::FnvHashMap;
use log::debug;

use crate::coordinates::Position;
use crate::errors::*;

/// One step of progress reported by a maze traversal.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum MazeEvent {
    /// A stack entry for the cell was popped; it is now being examined.
    Enter(Position),
    /// The cell `to` was reached for the first time from `from`; the wall between them goes.
    /// For the start cell `from == to` and there is no wall to remove.
    Discover { from: Position, to: Position },
    /// An unvisited neighbour was queued for a later visit.
    Push(Position),
    /// Processing of the popped entry for the cell is over.
    Reveal(Position),
}

impl MazeEvent {
    pub fn kind(&self) -> EventKind {
        match *self {
            MazeEvent::Enter(_) => EventKind::Enter,
            MazeEvent::Discover { .. } => EventKind::Discover,
            MazeEvent::Push(_) => EventKind::Push,
            MazeEvent::Reveal(_) => EventKind::Reveal,
        }
    }

    /// The cell the event is about. For a discovery that is the newly reached cell.
    pub fn position(&self) -> Position {
        match *self {
            MazeEvent::Enter(pos) | MazeEvent::Push(pos) | MazeEvent::Reveal(pos) => pos,
            MazeEvent::Discover { to, .. } => to,
        }
    }
}

impl fmt::Display for MazeEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeEvent::Discover { from, to } => write!(f, "{} {} -> {}", self.kind(), from, to),
            _ => write!(f, "{} {}", self.kind(), self.position()),
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum EventKind {
    Enter,
    Discover,
    Push,
    Reveal,
}

pub const ALL_EVENT_KINDS: [EventKind; 4] =
    [EventKind::Enter, EventKind::Discover, EventKind::Push, EventKind::Reveal];

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Enter => "enter",
            EventKind::Discover => "discover",
            EventKind::Push => "push",
            EventKind::Reveal => "reveal",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<EventKind> {
        ALL_EVENT_KINDS
            .iter()
            .cloned()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ErrorKind::UnknownEvent(name.to_owned()).into())
    }
}

pub type EventHandler = Box<dyn FnMut(&MazeEvent)>;

/// Handlers per event kind, called synchronously in the order they were subscribed.
#[derive(Default)]
pub struct EventListeners {
    handlers: FnvHashMap<EventKind, Vec<EventHandler>>,
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let counts: Vec<(EventKind, usize)> = ALL_EVENT_KINDS
            .iter()
            .map(|kind| (*kind, self.listener_count(*kind)))
            .collect();
        write!(f, "EventListeners :: {:?}", counts)
    }
}

impl EventListeners {
    pub fn new() -> EventListeners {
        EventListeners::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
        where F: FnMut(&MazeEvent) + 'static
    {
        self.handlers.entry(kind).or_insert_with(Vec::new).push(Box::new(handler));
    }

    /// Deliver `event` to every handler of its kind before returning.
    pub fn emit(&mut self, event: &MazeEvent) {
        debug!("{}", event);
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn gc(row: isize, col: isize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn event_kind_names_round_trip() {
        for kind in &ALL_EVENT_KINDS {
            assert_eq!(kind.name().parse::<EventKind>().unwrap(), *kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn unknown_event_name_is_an_error() {
        match "curr".parse::<EventKind>() {
            Err(Error(ErrorKind::UnknownEvent(name), _)) => assert_eq!(name, "curr"),
            other => panic!("expected unknown event error, got {:?}", other),
        }
    }

    #[test]
    fn event_position_and_kind() {
        let discover = MazeEvent::Discover { from: gc(0, 0), to: gc(0, 1) };
        assert_eq!(discover.kind(), EventKind::Discover);
        assert_eq!(discover.position(), gc(0, 1));
        assert_eq!(MazeEvent::Push(gc(2, 3)).position(), gc(2, 3));
        assert_eq!(MazeEvent::Reveal(gc(1, 1)).kind(), EventKind::Reveal);
        assert_eq!(discover.to_string(), "discover (0, 0) -> (0, 1)");
        assert_eq!(MazeEvent::Enter(gc(4, 2)).to_string(), "enter (4, 2)");
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = EventListeners::new();
        for tag in 0..3 {
            let calls = calls.clone();
            listeners.subscribe(EventKind::Reveal, move |_| calls.borrow_mut().push(tag));
        }

        listeners.emit(&MazeEvent::Reveal(gc(0, 0)));
        listeners.emit(&MazeEvent::Reveal(gc(0, 1)));
        assert_eq!(*calls.borrow(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn handlers_only_see_their_own_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = EventListeners::new();
        {
            let seen = seen.clone();
            listeners.subscribe(EventKind::Push, move |event| seen.borrow_mut().push(*event));
        }

        listeners.emit(&MazeEvent::Enter(gc(0, 0)));
        listeners.emit(&MazeEvent::Push(gc(1, 0)));
        listeners.emit(&MazeEvent::Discover { from: gc(0, 0), to: gc(0, 0) });
        listeners.emit(&MazeEvent::Push(gc(0, 1)));

        assert_eq!(*seen.borrow(), vec![MazeEvent::Push(gc(1, 0)), MazeEvent::Push(gc(0, 1))]);
        assert_eq!(listeners.listener_count(EventKind::Push), 1);
        assert_eq!(listeners.listener_count(EventKind::Enter), 0);
    }

    #[test]
    fn emitting_without_listeners_is_fine() {
        let mut listeners = EventListeners::new();
        listeners.emit(&MazeEvent::Enter(gc(0, 0)));
        assert_eq!(listeners.listener_count(EventKind::Enter), 0);
    }
}
