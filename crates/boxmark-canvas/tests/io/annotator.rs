use std::fs;
use std::path::Path;

use boxmark_canvas::{
    Action, Annotator, AnnotationStore, BoundingBox, Canvas, PascalVocStore, Shape, Vector2Int,
};
use boxmark_core::{AppEvent, ErrorEvent, EventBus, SessionEvent};
use boxmark_settings::{CanvasSettings, SessionSettings};

fn write_image(path: &Path, w: u32, h: u32) {
    image::RgbImage::new(w, h).save(path).unwrap();
}

fn folder() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_image(&dir.path().join("img1.png"), 40, 30);
    write_image(&dir.path().join("img2.png"), 60, 50);
    write_image(&dir.path().join("img10.png"), 20, 20);
    fs::write(dir.path().join("readme.txt"), "not an image").unwrap();
    dir
}

fn annotator() -> Annotator {
    let canvas = Canvas::new(CanvasSettings::default(), EventBus::shared());
    Annotator::new(canvas, PascalVocStore::new(), SessionSettings::default())
}

#[test]
fn test_open_folder_loads_first_image() {
    let dir = folder();
    PascalVocStore::new()
        .save(
            &dir.path().join("img1.png"),
            Vector2Int::new(40, 30),
            &[BoundingBox::new("cat", 1, 2, 20, 25)],
        )
        .unwrap();

    let mut annotator = annotator();
    let mut rx = annotator.canvas().bus().receiver();
    assert_eq!(annotator.open_folder(dir.path()).unwrap(), 3);

    let mut opened = None;
    let mut shown = None;
    while let Ok(event) = rx.try_recv() {
        match event {
            AppEvent::Session(SessionEvent::FolderOpened { folder, images }) => {
                opened = Some((folder, images))
            }
            AppEvent::Session(SessionEvent::ImageChanged { path, .. }) => shown = Some(path),
            _ => {}
        }
    }
    assert_eq!(opened, Some((dir.path().to_path_buf(), 3)));
    assert_eq!(shown, Some(dir.path().join("img1.png")));

    assert_eq!(annotator.current_image(), Some(dir.path().join("img1.png").as_path()));
    assert_eq!(annotator.canvas().image_size(), Some(Vector2Int::new(40, 30)));
    assert_eq!(annotator.canvas().shape_count(), 1);
    assert_eq!(annotator.canvas().shapes()[0].name(), "cat");
    assert_eq!(annotator.settings().last_folder.as_deref(), Some(dir.path()));
}

#[test]
fn test_switching_images_flushes_shapes() {
    let dir = folder();
    let mut annotator = annotator();
    annotator.open_folder(dir.path()).unwrap();

    annotator.canvas_mut().add_shape(Shape::from_corners(
        "dog",
        Vector2Int::new(5, 5),
        Vector2Int::new(15, 20),
    ));
    assert!(annotator.next_image().unwrap());
    assert_eq!(annotator.session().map(|s| s.index()), Some(1));
    assert_eq!(annotator.canvas().shape_count(), 0);
    assert_eq!(annotator.canvas().image_size(), Some(Vector2Int::new(60, 50)));

    let saved = PascalVocStore::new().load(&dir.path().join("img1.png"));
    assert_eq!(saved, vec![BoundingBox::new("dog", 5, 5, 15, 20)]);

    assert!(annotator.prev_image().unwrap());
    assert!(!annotator.prev_image().unwrap());
    assert_eq!(annotator.canvas().shapes()[0].name(), "dog");
}

#[test]
fn test_next_stops_at_last_image() {
    let dir = folder();
    let mut annotator = annotator();
    annotator.open_folder(dir.path()).unwrap();

    assert!(annotator.next_image().unwrap());
    assert!(annotator.next_image().unwrap());
    assert!(!annotator.next_image().unwrap());
    assert_eq!(annotator.current_image(), Some(dir.path().join("img10.png").as_path()));
}

#[test]
fn test_actions_from_queue() {
    let dir = folder();
    let mut annotator = annotator();
    annotator.open_folder(dir.path()).unwrap();
    let mut rx = annotator.canvas().bus().receiver();

    let sender = annotator.sender();
    std::thread::spawn(move || {
        sender.send(Action::NextImage);
        sender.send(Action::MultiSelect);
    })
    .join()
    .unwrap();

    assert_eq!(annotator.drain_actions(), 2);
    assert_eq!(annotator.session().map(|s| s.index()), Some(1));
    assert!(annotator.canvas().is_multi_select());

    let mut changed = false;
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::Session(SessionEvent::ImageChanged { index, .. }) = event {
            changed = index == 1;
        }
    }
    assert!(changed);
}

#[test]
fn test_failed_action_is_reported_and_loop_continues() {
    let dir = folder();
    let mut annotator = annotator();
    annotator.open_folder(dir.path()).unwrap();
    fs::write(dir.path().join("img2.png"), b"not a png").unwrap();
    let mut rx = annotator.canvas().bus().receiver();

    let sender = annotator.sender();
    sender.send(Action::NextImage);
    sender.send(Action::Move);
    assert_eq!(annotator.drain_actions(), 2);
    assert_eq!(annotator.canvas().mode().as_str(), "move");

    let mut failed = None;
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::Error(ErrorEvent::ActionFailed { action, .. }) = event {
            failed = Some(action);
        }
    }
    assert_eq!(failed.as_deref(), Some("next_image"));
}

#[test]
fn test_unreadable_image_keeps_its_sidecar() {
    let dir = folder();
    fs::write(dir.path().join("img2.png"), b"not a png").unwrap();
    let store = PascalVocStore::new();
    store
        .save(
            &dir.path().join("img2.png"),
            Vector2Int::new(60, 50),
            &[BoundingBox::new("dog", 1, 1, 9, 9)],
        )
        .unwrap();

    let mut annotator = annotator();
    annotator.open_folder(dir.path()).unwrap();
    annotator.canvas_mut().add_shape(Shape::from_corners(
        "cat",
        Vector2Int::new(2, 2),
        Vector2Int::new(8, 8),
    ));

    assert!(annotator.next_image().is_err());
    assert_eq!(annotator.current_image(), Some(dir.path().join("img2.png").as_path()));
    assert_eq!(annotator.canvas().shape_count(), 0);
    assert_eq!(annotator.canvas().image_size(), None);
    assert_eq!(annotator.flush().unwrap(), None);

    assert!(annotator.next_image().unwrap());
    assert_eq!(
        store.load(&dir.path().join("img2.png")),
        vec![BoundingBox::new("dog", 1, 1, 9, 9)]
    );
    assert_eq!(
        store.load(&dir.path().join("img1.png")),
        vec![BoundingBox::new("cat", 2, 2, 8, 8)]
    );
}

#[test]
fn test_dispatch_without_folder() {
    let mut annotator = annotator();
    annotator.dispatch(Action::NextImage).unwrap();
    annotator.dispatch(Action::CreateShape).unwrap();
    assert_eq!(annotator.canvas().mode().as_str(), "create");
    assert!(annotator.load_current().is_err());
}
