use super::*;

#[test]
fn newest_lines_come_first() {
    let mut log = CaptureLog::new();
    log.log("first");
    log.log(String::from("second"));
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines, vec!["second", "first"]);
    assert_eq!(log.len(), 2);
}

#[test]
fn clear_empties_the_log() {
    let mut log = CaptureLog::new();
    log.log("x");
    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.lines().count(), 0);
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn lines_are_mirrored_as_tracing_events() {
    let sink = Captured::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut log = CaptureLog::new();
        log.log("saved: smile.png");
    });

    let out = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
    assert!(out.contains("INFO"));
    assert!(out.contains("emoview::capture"));
    assert!(out.contains("saved: smile.png"));
}
