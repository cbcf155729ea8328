use std::{any::TypeId, path::PathBuf, sync::Arc};

use clockface_core::{
    config::{self, Config, ConfigEvent},
    event_bus::{BusEvent, EventReceiver},
    face::ClockFace,
    face_context::FaceContext,
};
use clockface_proto::ports::wall_clock::WallClock;
use flexi_logger::LoggerHandle;
use iced::{
    Element, Event, Length, Size, Subscription, Task, Theme, event,
    futures::{SinkExt, channel::mpsc::Sender},
    stream::channel,
    widget::{canvas, canvas::Cache, container},
    window,
};
use log::{debug, error, info, warn};

use crate::{canvas::ClockCanvas, get_log_spec};

pub struct App {
    config_path: PathBuf,
    logger: LoggerHandle,
    clock: Arc<dyn WallClock>,
    context: FaceContext,
    bus_receiver: EventReceiver,
    bounds: Size,
    face: ClockFace,
    cache: Cache,
    pub config: Config,
}

#[derive(Debug, Clone)]
pub enum Message {
    Bus(BusEvent),
    Resized(Size),
    ConfigChanged(ConfigEvent),
}

impl App {
    pub fn new(
        (logger, config, config_path, clock, context, bus_receiver): (
            LoggerHandle,
            Config,
            PathBuf,
            Arc<dyn WallClock>,
            FaceContext,
            EventReceiver,
        ),
    ) -> impl FnOnce() -> (Self, Task<Message>) {
        move || {
            let bounds = Size::new(config.window.width, config.window.height);
            let mut face = ClockFace::new(&config, Arc::clone(&clock), context.clone());
            face.layout(bounds);

            (
                App {
                    config_path,
                    logger,
                    clock,
                    context,
                    bus_receiver,
                    bounds,
                    face,
                    cache: Cache::new(),
                    config,
                },
                Task::none(),
            )
        }
    }

    pub fn title(&self) -> String {
        String::from("clockface")
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Bus(event) => match event {
                BusEvent::Tick => {
                    self.face.tick();
                    self.cache.clear();
                }
                _ => debug!("Ignoring bus event {event:?}"),
            },
            Message::Resized(bounds) => {
                self.bounds = bounds;
                self.face.layout(bounds);
                self.cache.clear();
            }
            Message::ConfigChanged(ConfigEvent::Updated(config)) => {
                self.apply_config(*config);
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let background = self.config.appearance.background_color();

        container(
            canvas(ClockCanvas::new(&self.face, &self.cache))
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(background.into()),
            ..container::Style::default()
        })
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            bus_events(self.bus_receiver.clone()).map(Message::Bus),
            event::listen_with(window_message),
            config::subscription(&self.config_path).map(Message::ConfigChanged),
        ])
    }

    /// Replaces the face with one built from `config`.
    ///
    /// Dropping the previous face cancels its pending redraw.
    fn apply_config(&mut self, config: Config) {
        if let Err(err) = config.validate() {
            warn!("Ignoring invalid configuration: {err}");
            return;
        }

        info!("New config applied: {config:?}");

        if config.log_level != self.config.log_level {
            self.logger.set_new_spec(get_log_spec(&config.log_level));
        }

        let mut face = ClockFace::new(&config, Arc::clone(&self.clock), self.context.clone());
        face.layout(self.bounds);

        self.face = face;
        self.config = config;
        self.cache.clear();
    }
}

/// Forwards bus events to the update loop as they are published.
fn bus_events(receiver: EventReceiver) -> Subscription<BusEvent> {
    Subscription::run_with_id(
        TypeId::of::<BusEvent>(),
        channel(4, move |output| forward_bus(receiver, output)),
    )
}

async fn forward_bus(mut receiver: EventReceiver, mut output: Sender<BusEvent>) {
    loop {
        let events = match receiver.next_batch().await {
            Ok(events) => events,
            Err(err) => {
                error!("Failed to read event bus, stopping tick forwarding: {err}");
                return;
            }
        };

        for event in events {
            if let Err(err) = output.send(event).await {
                error!("Failed to forward bus event: {err}");
                return;
            }
        }
    }
}

/// Window geometry changes that require a new layout.
fn window_message(event: Event, _status: event::Status, _id: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Opened { size, .. } | window::Event::Resized(size)) => {
            Some(Message::Resized(size))
        }
        _ => None,
    }
}
