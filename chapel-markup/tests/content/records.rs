use crate::common::read_fixture;
use chapel_markup::content::{ContentRecord, Problem, RecurrenceKind, Validate};
use chapel_markup::{LineBreaks, RenderOptions};

fn record(name: &str) -> ContentRecord {
    ContentRecord::from_json(&read_fixture(&format!("records/{name}.json"))).unwrap()
}

#[test]
fn test_event_fixture() {
    let record = record("event");
    assert_eq!(record.kind(), "event");
    assert!(record.validate().is_ok());

    let ContentRecord::Event(event) = &record else {
        panic!("expected an event");
    };
    let recurrence = event.recurrence.as_ref().unwrap();
    assert_eq!(recurrence.kind, RecurrenceKind::Weekly);
    assert_eq!(recurrence.count, None);

    let rendered = record.render_fields(&RenderOptions::default());
    assert_eq!(
        rendered.get("description"),
        Some("Soup, bread and fellowship.<br>Bring a <strong>bowl</strong>!")
    );
}

#[test]
fn test_sermon_fixture() {
    let record = record("sermon");
    assert!(record.validate().is_ok());
    assert_eq!(
        record.render_fields(&RenderOptions::default()).get("summary"),
        Some("<h2>Abide</h2><br>Fruit comes from <em>staying</em> connected.")
    );
}

#[test]
fn test_site_settings_fixture() {
    let record = record("site-settings");
    assert!(record.validate().is_ok());

    let options = RenderOptions::default().with_line_breaks(LineBreaks::Paragraphs);
    assert_eq!(
        record.render_fields(&options).get("about"),
        Some("<p>Founded in 1887.</p><blockquote>Come and see.</blockquote>")
    );
}

#[test]
fn test_invalid_event_reports_every_field() {
    let errors = record("invalid-event").validate().unwrap_err();

    let found: Vec<(&str, &Problem)> = errors
        .errors()
        .iter()
        .map(|error| (error.field.as_str(), &error.problem))
        .collect();

    assert_eq!(found.len(), 5);
    assert_eq!(found[0], ("title", &Problem::Required));
    assert_eq!(found[1], ("end", &Problem::EndBeforeStart));
    assert_eq!(found[2].0, "recurrence.interval");
    assert_eq!(found[3], ("recurrence.days", &Problem::Required));
    assert!(matches!(found[4], ("recurrence.count", Problem::Conflict { .. })));
}

#[test]
fn test_record_round_trips_through_json() {
    let original = record("sermon");
    let json = serde_json::to_string(&original).unwrap();
    assert!(json.contains("\"kind\":\"sermon\""));
    assert_eq!(ContentRecord::from_json(&json).unwrap(), original);
}
