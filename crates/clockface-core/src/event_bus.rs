use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use masterror::AppError;
use tokio::sync::Notify;

/// Events published from background tasks to the rendering thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BusEvent {
    /// The redraw timer elapsed; the face should refresh its reading.
    Tick,
}

impl BusEvent {
    fn is_coalescable_with(&self, other: &Self) -> bool {
        matches!((self, other), (BusEvent::Tick, BusEvent::Tick))
    }
}

#[derive(Debug)]
struct EventBusInner {
    queue: Mutex<VecDeque<BusEvent>>,
    capacity: usize,
    notify: Notify,
}

impl EventBusInner {
    fn push(&self, event: BusEvent) -> Result<(), EventBusError> {
        let mut queue = self.queue.lock().map_err(|_| EventBusError::Poisoned)?;

        if queue.len() >= self.capacity {
            return Err(EventBusError::QueueFull {
                capacity: self.capacity,
            });
        }

        if let Some(last) = queue.back() {
            if event.is_coalescable_with(last) {
                return Ok(());
            }
        }

        queue.push_back(event);
        drop(queue);

        self.notify.notify_one();
        Ok(())
    }

    fn drain(&self) -> Result<Vec<BusEvent>, EventBusError> {
        let mut queue = self.queue.lock().map_err(|_| EventBusError::Poisoned)?;

        Ok(queue.drain(..).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBusError {
    QueueFull { capacity: usize },
    Poisoned,
}

impl std::fmt::Display for EventBusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueFull { capacity } => {
                write!(f, "Event queue is full (capacity: {})", capacity)
            }
            Self::Poisoned => write!(f, "Event queue state is poisoned"),
        }
    }
}

impl std::error::Error for EventBusError {}

impl From<EventBusError> for AppError {
    fn from(err: EventBusError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Bounded queue shared between the redraw timer and the host.
#[derive(Debug, Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl EventBus {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(EventBusInner {
                queue: Mutex::new(VecDeque::with_capacity(capacity.get())),
                capacity: capacity.get(),
                notify: Notify::new(),
            }),
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    inner: Arc<EventBusInner>,
}

impl EventSender {
    pub fn try_send(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }
}

#[derive(Debug, Clone)]
pub struct EventReceiver {
    inner: Arc<EventBusInner>,
}

impl EventReceiver {
    /// Takes every queued event in publication order.
    pub fn drain(&mut self) -> Result<Vec<BusEvent>, EventBusError> {
        self.inner.drain()
    }

    /// Waits until at least one event is queued, then drains the queue.
    pub async fn next_batch(&mut self) -> Result<Vec<BusEvent>, EventBusError> {
        loop {
            let events = self.inner.drain()?;
            if !events.is_empty() {
                return Ok(events);
            }

            self.inner.notify.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(capacity: usize) -> EventBus {
        EventBus::new(NonZeroUsize::new(capacity).expect("non-zero"))
    }

    #[test]
    fn consecutive_ticks_are_coalesced() {
        let bus = bus(4);
        let sender = bus.sender();
        let mut receiver = bus.receiver();

        sender.try_send(BusEvent::Tick).expect("first");
        sender.try_send(BusEvent::Tick).expect("second");
        sender.try_send(BusEvent::Tick).expect("third");

        assert_eq!(receiver.drain().expect("drain"), vec![BusEvent::Tick]);
        assert!(receiver.drain().expect("drain").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn next_batch_waits_for_published_event() {
        let bus = bus(4);
        let sender = bus.sender();
        let mut receiver = bus.receiver();

        let waiter = tokio::spawn(async move { receiver.next_batch().await });
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        sender.try_send(BusEvent::Tick).expect("tick");

        let events = waiter.await.expect("join").expect("batch");
        assert_eq!(events, vec![BusEvent::Tick]);
    }

    #[tokio::test]
    async fn next_batch_returns_already_queued_events() {
        let bus = bus(4);
        let mut receiver = bus.receiver();

        bus.sender().try_send(BusEvent::Tick).expect("tick");

        assert_eq!(receiver.next_batch().await.expect("batch"), vec![BusEvent::Tick]);
    }

    #[test]
    fn full_queue_rejects_events() {
        let bus = bus(1);
        let sender = bus.sender();

        sender.try_send(BusEvent::Tick).expect("fits");
        let error = sender.try_send(BusEvent::Tick).expect_err("queue is full");

        assert_eq!(error, EventBusError::QueueFull { capacity: 1 });
        assert_eq!(error.to_string(), "Event queue is full (capacity: 1)");
    }
}
