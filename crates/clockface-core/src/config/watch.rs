use std::{
    any::TypeId,
    path::{Path, PathBuf},
};

use iced::{
    Subscription,
    futures::{SinkExt, StreamExt, channel::mpsc::Sender, pin_mut},
    stream::channel,
};
use inotify::{EventMask, Inotify, WatchMask};
use log::{debug, error, info};

use super::{Config, load_or_default};

#[derive(Debug, Clone)]
pub enum ConfigEvent {
    Updated(Box<Config>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileChange {
    Changed,
    Removed,
}

fn classify(mask: EventMask) -> Option<FileChange> {
    if mask.intersects(EventMask::DELETE | EventMask::MOVED_FROM) {
        Some(FileChange::Removed)
    } else if mask.intersects(EventMask::CREATE | EventMask::MODIFY | EventMask::MOVED_TO) {
        Some(FileChange::Changed)
    } else {
        None
    }
}

fn event_for(change: FileChange, path: &Path) -> ConfigEvent {
    match change {
        FileChange::Changed => {
            info!("Reload config file");
            ConfigEvent::Updated(Box::new(load_or_default(path)))
        }
        FileChange::Removed => {
            info!("Config file removed");
            ConfigEvent::Updated(Box::default())
        }
    }
}

/// Emits a fresh [`Config`] whenever the file at `path` changes.
///
/// The parent directory is watched rather than the file itself so editors
/// that replace the file on save are still observed.
pub fn subscription(path: &Path) -> Subscription<ConfigEvent> {
    let path = path.to_path_buf();
    let id = (TypeId::of::<Config>(), path.clone());

    Subscription::run_with_id(id, channel(16, move |output| watch(path, output)))
}

async fn watch(path: PathBuf, mut output: Sender<ConfigEvent>) {
    let (Some(folder), Some(file_name)) = (path.parent(), path.file_name()) else {
        error!("Config path {path:?} has no parent directory or file name, cannot watch it");
        return;
    };

    let inotify = match Inotify::init() {
        Ok(inotify) => inotify,
        Err(err) => {
            error!("Failed to initialize inotify: {err}");
            return;
        }
    };

    if let Err(err) = inotify.watches().add(
        folder,
        WatchMask::CREATE | WatchMask::DELETE | WatchMask::MOVE | WatchMask::MODIFY,
    ) {
        error!("Failed to add watch for {folder:?}: {err}");
        return;
    }

    let events = match inotify.into_event_stream([0; 1024]) {
        Ok(events) => events,
        Err(err) => {
            error!("Failed to create inotify event stream: {err}");
            return;
        }
    };
    pin_mut!(events);

    debug!("Watching config file at {path:?}");

    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(err) => {
                error!("Failed to read watch event: {err}");
                continue;
            }
        };

        if event.name.as_deref() != Some(file_name) {
            continue;
        }

        let Some(change) = classify(event.mask) else {
            debug!("Ignoring config event {:?}", event.mask);
            continue;
        };

        if output.send(event_for(change, &path)).await.is_err() {
            info!("Config subscription closed");
            break;
        }
    }

    info!("Config watcher terminated");
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn classifies_removal() {
        assert_eq!(classify(EventMask::DELETE), Some(FileChange::Removed));
        assert_eq!(classify(EventMask::MOVED_FROM), Some(FileChange::Removed));
    }

    #[test]
    fn classifies_changes() {
        assert_eq!(classify(EventMask::CREATE), Some(FileChange::Changed));
        assert_eq!(classify(EventMask::MODIFY), Some(FileChange::Changed));
        assert_eq!(classify(EventMask::MOVED_TO), Some(FileChange::Changed));
    }

    #[test]
    fn ignores_unrelated_events() {
        assert_eq!(classify(EventMask::ACCESS), None);
        assert_eq!(classify(EventMask::OPEN), None);
    }

    #[test]
    fn changed_file_is_reloaded() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"[hands]\nsecond_hand_width = 4\n")
            .expect("write config");

        let ConfigEvent::Updated(config) = event_for(FileChange::Changed, file.path());
        assert_eq!(config.hands.second_hand_width.get(), 4);
    }

    #[test]
    fn removed_file_restores_defaults() {
        let file = NamedTempFile::new().expect("temp file");

        let ConfigEvent::Updated(config) = event_for(FileChange::Removed, file.path());
        assert_eq!(*config, Config::default());
    }
}
