//! A configured, file-backed session survives being reopened.

use pretty_assertions::assert_eq;
use stringer_config::StringerConfig;
use stringer_core::enums::CountField;
use stringer_session::FileSession;

fn config_in(dir: &std::path::Path) -> StringerConfig {
    let mut config = StringerConfig::default();
    config.storage.data_dir = dir.display().to_string();
    config.entry.unit_count = 3;
    config.entry.operator = "line lead".into();
    config
}

#[test]
fn reopened_session_resumes_draft() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut session = FileSession::open(&config, 10).unwrap();
    assert_eq!(session.state().snapshot().len(), 3);
    session.on_track_edit(2, 1, CountField::Ok, "48").unwrap();
    session.save_now().unwrap();
    let draft = session.state().snapshot().clone();
    drop(session);

    assert!(dir.path().join("data-entry-10.json").exists());
    let reopened = FileSession::open(&config, 10).unwrap();
    assert_eq!(reopened.state().snapshot(), &draft);
    assert_eq!(reopened.report().progress.completed, 1);
}

#[test]
fn submissions_use_configured_operator() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut session = FileSession::open(&config, 11).unwrap();
    session.on_track_edit(1, 1, CountField::Ok, "24").unwrap();
    let outcome = session.submit(None).unwrap();
    assert!(outcome.is_submitted());

    let history = FileSession::open(&config, 12).unwrap().history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user, "line lead");
    assert_eq!(history[0].total_modules(), 2);
}
