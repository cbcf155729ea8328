use std::{backtrace::Backtrace, num::NonZeroUsize, panic, path::PathBuf, sync::Arc};

use clap::Parser;
use clockface_core::{
    adapters::system_clock::SystemClock,
    config::{Config, get_config},
    event_bus::EventBus,
    face::FaceStyles,
    face_context::FaceContext,
};
use clockface_gui::{App, get_log_spec};
use clockface_proto::ports::wall_clock::WallClock;
use flexi_logger::{Age, Cleanup, Criterion, FileSpec, LogSpecBuilder, Logger, Naming};
use iced::Size;
use log::{debug, error};
use masterror::AppResult;

const EVENT_BUS_CAPACITY: NonZeroUsize = NonZeroUsize::new(16).unwrap();

#[derive(Parser, Debug)]
#[command(version, about = "Analog clock face", long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,
}

fn load_config(path: Option<PathBuf>) -> AppResult<(Config, PathBuf)> {
    Ok(get_config(path)?)
}

#[tokio::main]
async fn main() -> iced::Result {
    let args = Args::parse();

    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory("/tmp/clockface"))
    .duplicate_to_stdout(flexi_logger::Duplicate::All)
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    );
    let logger = match logger.start() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            std::process::exit(1);
        }
    };
    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));

    debug!("args: {args:?}");

    let (config, config_path) = load_config(args.config_path).unwrap_or_else(|err| {
        error!("Failed to read config: {err}");

        std::process::exit(1);
    });

    logger.set_new_spec(get_log_spec(&config.log_level));

    let bus = EventBus::new(EVENT_BUS_CAPACITY);
    let context = FaceContext::new(bus.sender(), tokio::runtime::Handle::current());
    let clock: Arc<dyn WallClock> = Arc::new(SystemClock::new());

    let anti_aliased = FaceStyles::new(&config.hands).anti_aliased();
    let window_size = Size::new(config.window.width, config.window.height);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .antialiasing(anti_aliased)
        .window_size(window_size)
        .run_with(App::new((
            logger,
            config,
            config_path,
            clock,
            context,
            bus.receiver(),
        )))
}
