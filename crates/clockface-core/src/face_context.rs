use tokio::runtime::Handle;

use crate::event_bus::{BusEvent, EventBusError, EventSender};

/// Host facilities handed to a clock face at construction.
///
/// The context owns an [`EventSender`] used to push [`BusEvent`] values to the
/// rendering thread and a [`Handle`] to the runtime that drives the redraw
/// timer. Tasks spawned through the handle are aborted when the face is torn
/// down, so they must not hold anything that needs an explicit release.
#[derive(Debug, Clone)]
pub struct FaceContext {
    event_sender: EventSender,
    runtime_handle: Handle,
}

impl FaceContext {
    /// # Examples
    ///
    /// ```
    /// # use clockface_core::{event_bus::EventBus, face_context::FaceContext};
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
    /// let context = FaceContext::new(bus.sender(), runtime.handle().clone());
    /// # drop(context);
    /// ```
    pub fn new(event_sender: EventSender, runtime_handle: Handle) -> Self {
        Self {
            event_sender,
            runtime_handle,
        }
    }

    pub fn runtime_handle(&self) -> &Handle {
        &self.runtime_handle
    }

    /// Ask the host to run the face's tick on the rendering thread.
    ///
    /// # Postconditions
    ///
    /// - Enqueues a [`BusEvent::Tick`] if the bus has remaining capacity,
    ///   otherwise returns [`EventBusError::QueueFull`].
    pub fn request_tick(&self) -> Result<(), EventBusError> {
        self.event_sender.try_send(BusEvent::Tick)
    }
}
