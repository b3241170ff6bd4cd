#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use anyhow::Result;
use std::fs;
use taskfile_core::{ChangeSets, Note, SyncMlConfig, Task, TaskGraph};
use taskfile_store::{CONFIG_FILE, StoreError, TaskFile};
use taskfile_xml::WriteError;
use tempfile::tempdir;
use time::Duration;
use time::macros::datetime;

fn graph() -> TaskGraph {
    let mut task = Task::new("t1", "Pay bills").with_child(Task::new("t1.1", "Electricity"));
    task.due = Some(datetime!(2024-05-01 12:00:00));
    task.notes.push(Note::new("n1", "account numbers"));
    TaskGraph {
        tasks: vec![task],
        ..TaskGraph::default()
    }
}

#[test]
fn save_writes_task_file_with_header() -> Result<()> {
    let dir = tempdir()?;
    let file = TaskFile::new(dir.path().join("todo.tsk"));
    file.save(&graph())?;

    let text = fs::read_to_string(file.path())?;
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<?taskcoach release="));
    assert!(text.contains("<task id=\"t1\""));
    assert!(text.contains("duedate=\"2024-05-01 12:00:00\""));
    Ok(())
}

#[test]
fn saving_same_graph_twice_is_stable() -> Result<()> {
    let dir = tempdir()?;
    let file = TaskFile::new(dir.path().join("todo.tsk"));
    file.save(&graph())?;
    let first = fs::read(file.path())?;
    file.save(&graph())?;
    assert_eq!(fs::read(file.path())?, first);
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn failed_save_keeps_previous_file() -> Result<()> {
    let dir = tempdir()?;
    let file = TaskFile::new(dir.path().join("todo.tsk"));
    file.save(&graph())?;
    let before = fs::read(file.path())?;

    let mut config = SyncMlConfig::new("root");
    config.child_mut("bad name");
    let broken = TaskGraph {
        syncml_config: Some(config),
        ..graph()
    };
    let Err(StoreError::Write(WriteError::InvalidName(name))) = file.save(&broken) else {
        panic!("invalid synchronization setting name must fail");
    };
    assert_eq!(name, "bad name");
    assert_eq!(fs::read(file.path())?, before);
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn changes_go_to_delta_file() -> Result<()> {
    let dir = tempdir()?;
    let file = TaskFile::new(dir.path().join("todo.tsk"));
    let mut changes = ChangeSets::new();
    changes.device_mut("devA").record_change("t1", "subject");
    file.save_changes(&changes)?;

    assert_eq!(file.delta_path(), dir.path().join("todo.tsk.delta"));
    assert_eq!(
        fs::read_to_string(file.delta_path())?,
        r#"<changes><device guid="devA"><obj id="t1">subject</obj></device></changes>"#
    );
    Ok(())
}

#[test]
fn open_reads_directory_configuration() -> Result<()> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join(CONFIG_FILE),
        "[writer]\nrelease = \"9.9.9\"\ntskversion = 36\nencoding = \"latin-1\"\n\n[changes]\nsuffix = \".sync\"\n",
    )?;
    let file = TaskFile::open(dir.path().join("todo.tsk"))?;
    assert_eq!(file.delta_path(), dir.path().join("todo.tsk.sync"));

    let mut task = Task::new("t1", "Caf\u{e9}");
    task.budget = Duration::hours(2);
    file.save(&TaskGraph {
        tasks: vec![task],
        ..TaskGraph::default()
    })?;
    let bytes = fs::read(file.path())?;
    assert!(bytes.starts_with(b"<?taskcoach release=\"9.9.9\" tskversion=\"36\"?>\n"));
    assert!(bytes.windows(4).any(|window| window == b"Caf\xe9"));
    Ok(())
}

#[test]
fn open_reports_invalid_configuration() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join(CONFIG_FILE), "[writer]\ntskversion = \"x\"\n")?;
    let Err(err) = TaskFile::open(dir.path().join("todo.tsk")) else {
        panic!("invalid configuration must be rejected");
    };
    assert!(format!("{err:#}").contains(CONFIG_FILE));
    Ok(())
}

#[test]
fn template_is_written_with_relative_dates() -> Result<()> {
    let dir = tempdir()?;
    let file = TaskFile::new(dir.path().join("todo.tsk"));
    let mut task = Task::new("tmpl", "Weekly review");
    task.templates.due = Some("7 days from now".to_owned());
    task.due = Some(datetime!(2024-05-01 12:00:00));

    let template = dir.path().join("review.tsktmpl");
    file.save_template(&template, &task)?;
    let text = fs::read_to_string(&template)?;
    assert!(text.contains("duedatetmpl=\"7 days from now\""));
    assert!(text.contains("duedate=\"2024-05-01 12:00:00\""));
    Ok(())
}
