use mosaiv_core::config::AppConfig;
use mosaiv_ui::app::App;
use mosaiv_ui::message::Message;
use mosaiv_test_harness::fixtures;

fn app() -> App {
    App::with_config(AppConfig::default())
}

fn load_png(app: &mut App, name: &str, width: u32, height: u32) {
    let bytes = fixtures::png_bytes(width, height, [64, 128, 192]);
    let _ = app.update(Message::FilePicked(Some((name.to_string(), bytes))));
}

#[test]
fn test_file_picked_installs_source_and_preview() {
    let mut app = app();
    load_png(&mut app, "tile.png", 8, 8);

    assert_eq!(app.source_name(), Some("tile.png"));
    assert!(app.has_preview());
    assert!(app.status().contains("Loaded tile.png"));
    assert!(app.status().contains("8x8"));
    assert_eq!(app.live_images(), 1);
}

#[test]
fn test_dialog_cancel_changes_nothing() {
    let mut app = app();
    let _ = app.update(Message::FilePicked(None));
    assert_eq!(app.source_name(), None);
    assert!(!app.has_preview());
    assert_eq!(app.status(), "Open cancelled");
}

#[test]
fn test_bad_upload_reports_and_installs_nothing() {
    let mut app = app();
    let _ = app.update(Message::FilePicked(Some((
        "junk.png".to_string(),
        fixtures::not_an_image(),
    ))));

    assert_eq!(app.source_name(), None);
    assert!(!app.has_preview());
    assert!(app.status().contains("could not load image"));
}

#[test]
fn test_bad_upload_keeps_previous_source() {
    let mut app = app();
    load_png(&mut app, "good.png", 8, 8);

    let _ = app.update(Message::FilePicked(Some((
        "bad.png".to_string(),
        fixtures::not_an_image(),
    ))));

    assert_eq!(app.source_name(), Some("good.png"));
    assert!(app.has_preview());
    assert_eq!(app.live_images(), 1);
}

#[test]
fn test_replacement_swaps_source() {
    let mut app = app();
    load_png(&mut app, "one.png", 8, 8);
    load_png(&mut app, "two.png", 16, 16);

    assert_eq!(app.source_name(), Some("two.png"));
    assert_eq!(app.live_images(), 1);
}

#[test]
fn test_slider_and_seed_toggle_update_state() {
    let mut app = app();
    let _ = app.update(Message::CellCountChanged(77));
    assert_eq!(app.cell_count(), 77);

    assert!(!app.random_seeds());
    let _ = app.update(Message::RandomSeedsToggled(true));
    assert!(app.random_seeds());
}

#[test]
fn test_apply_mosaic_updates_preview() {
    let mut app = app();
    load_png(&mut app, "tile.png", 32, 32);

    let _ = app.update(Message::CellCountChanged(16));
    let _ = app.update(Message::ApplyMosaic);

    assert!(app.status().contains("Mosaic applied"));
    assert!(app.has_preview());
    assert_eq!(app.live_images(), 1, "working copy leaked");
}

#[test]
fn test_apply_mosaic_without_source_fails_gracefully() {
    let mut app = app();
    let _ = app.update(Message::ApplyMosaic);
    assert!(app.status().contains("Mosaic failed"));
    assert!(!app.has_preview());
}

#[test]
fn test_clear_releases_everything() {
    let mut app = app();
    load_png(&mut app, "tile.png", 8, 8);

    let _ = app.update(Message::ClearImage);
    assert_eq!(app.source_name(), None);
    assert!(!app.has_preview());
    assert_eq!(app.live_images(), 0);
}
