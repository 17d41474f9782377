//! Deferred task scheduling
//!
//! A turn-clocked queue. Work is submitted with a delay in turns and handed
//! back when the clock reaches it; nothing blocks while waiting.

/// Handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    id: TaskId,
    due: u64,
    task: T,
}

/// Queue of tasks waiting for a future turn
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    /// Current turn
    now: u64,
    next_id: u64,
    queue: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            queue: Vec::new(),
        }
    }

    /// Current turn number
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue `task` to come due `delay` turns from now.
    ///
    /// A delay of 0 still waits for the next tick.
    pub fn schedule(&mut self, delay: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push(ScheduledTask {
            id,
            due: self.now.saturating_add(delay.max(1)),
            task,
        });
        id
    }

    /// Drop a pending task. Returns false if it already ran or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.id != id);
        self.queue.len() < before
    }

    /// Drop every pending task matching `predicate`, returning how many
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.queue.len();
        self.queue.retain(|t| !predicate(&t.task));
        before - self.queue.len()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterate pending tasks in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter().map(|t| &t.task)
    }

    /// Advance one turn and take every task now due, in submission order
    pub fn tick(&mut self) -> Vec<T> {
        self.now += 1;
        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|t| t.due <= now);
        self.queue = waiting;
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.task).collect()
    }
}
