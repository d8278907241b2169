use crate::clock::Millis;

/// The two notification channels a clock engine dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Fired once per frame with the current elapsed time.
    Update,
    /// Fired once per due alarm deadline with the elapsed time at firing.
    Alarm,
}

/// Handle returned by [`EventBus::on`], used to remove a single listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

pub(crate) type Callback = Box<dyn FnMut(Millis) + Send + 'static>;

/// Ordered callback registries for the `update` and `alarm` channels.
///
/// Insertion order is dispatch order, and the same closure may be registered
/// more than once. Panics raised by a callback are not caught here; a
/// panicking listener aborts the rest of that dispatch pass.
#[derive(Default)]
pub struct EventBus {
    update: Vec<(ListenerId, Callback)>,
    alarm: Vec<(ListenerId, Callback)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `callback` to the channel and returns its removal handle.
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> ListenerId
    where
        F: FnMut(Millis) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.channel_mut(kind).push((id, Box::new(callback)));
        id
    }

    /// Removes the listener registered under `id`. Returns false if it was
    /// already removed or never belonged to this channel.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let channel = self.channel_mut(kind);
        match channel.iter().position(|(lid, _)| *lid == id) {
            Some(pos) => {
                channel.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Clears one channel. Returns false if it had no listeners.
    pub fn off_event(&mut self, kind: EventKind) -> bool {
        let channel = self.channel_mut(kind);
        let had_listeners = !channel.is_empty();
        channel.clear();
        had_listeners
    }

    /// Clears every channel.
    pub fn off_all(&mut self) {
        self.update.clear();
        self.alarm.clear();
    }

    /// Invokes every listener on `kind` in registration order, synchronously.
    pub fn dispatch(&mut self, kind: EventKind, elapsed: Millis) {
        for (_, callback) in self.channel_mut(kind).iter_mut() {
            callback(elapsed);
        }
    }

    fn channel_mut(&mut self, kind: EventKind) -> &mut Vec<(ListenerId, Callback)> {
        match kind {
            EventKind::Update => &mut self.update,
            EventKind::Alarm => &mut self.alarm,
        }
    }
}
