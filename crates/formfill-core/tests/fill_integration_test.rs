//! End-to-end fill and learn flows over parsed pages and a file-backed store.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use formfill_core::{
    Acknowledgement, Command, CommandDispatcher, FillSource, FormFiller, JsonFileStore, Learner,
    MappingStore, Outcome, ProfileStore, TargetCapture,
};
use formfill_dom::Document;
use formfill_protocols::{FillError, KeyValueStore, Page, Profile};

const APPLICATION: &str = r#"
<!DOCTYPE html>
<html><body>
<form id="application">
  <fieldset id="personal">
    <legend>About you</legend>
    <label for="fn">First name</label><input id="fn" name="applicant_fname">
    <label for="ln">Last name</label><input id="ln" name="applicant_lname">
    <input type="email" name="email" placeholder="Email address">
    <input type="tel" name="phone_number" aria-label="Phone">
    <input type="hidden" name="email_token" value="abc">
    <input id="q7" class="question">
  </fieldset>

  <div class="entry">
    <h3>Work experience 1</h3>
    <input name="job_title_0" placeholder="Title">
    <input name="company_0" placeholder="Employer">
  </div>
  <div class="entry">
    <h3>Work experience 2</h3>
    <input name="job_title_1" placeholder="Title">
    <input name="company_1" placeholder="Employer">
  </div>

  <section id="schooling">
    <h2>Education</h2>
    <input name="institution" placeholder="School">
    <input name="degree_earned" placeholder="Degree">
  </section>

  <textarea name="notes" aria-label="Additional information"></textarea>
</form>
</body></html>
"#;

fn profile() -> Profile {
    serde_json::from_value(json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "phone": "+44 20 0000 0000",
        "coverLetter": "I would like to apply.",
        "customFields": {"heardFrom": "A colleague"},
        "workExperience": [
            {"title": "Analyst", "company": "Babbage & Co"},
            {"title": "Translator", "company": "Taylor's Scientific Memoirs"}
        ],
        "education": [{"school": "Private tutors", "degree": "None"}]
    }))
    .unwrap()
}

struct App {
    _dir: TempDir,
    store: Arc<JsonFileStore>,
    doc: Arc<Document>,
    dispatcher: CommandDispatcher,
}

fn app(html: &str) -> App {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("storage.json")));
    let doc = Arc::new(Document::parse(html));
    let mappings = Arc::new(MappingStore::new(store.clone()));
    let dispatcher = CommandDispatcher::new(
        Arc::new(FormFiller::new(doc.clone(), mappings.clone())),
        Arc::new(Learner::new(doc.clone(), mappings)),
        Arc::new(ProfileStore::new(store.clone())),
        Arc::new(TargetCapture::default()),
    );
    App {
        _dir: dir,
        store,
        doc,
        dispatcher,
    }
}

fn value_of(doc: &Document, name: &str) -> Option<String> {
    let element = doc
        .query_selector(&format!(r#"[name="{name}"]"#))
        .unwrap()
        .unwrap();
    doc.value(element)
}

async fn run(app: &App, command: Command) -> Outcome {
    match app.dispatcher.dispatch(command).await {
        Acknowledgement::Accepted(completion) => completion.wait().await,
        Acknowledgement::Rejected(err) => panic!("command rejected: {err}"),
    }
}

#[tokio::test]
async fn test_full_application_form() {
    let app = app(APPLICATION);
    let Outcome::Filled(report) = run(
        &app,
        Command::Fill {
            profile: Box::new(profile()),
        },
    )
    .await
    else {
        panic!("expected a fill report");
    };

    assert_eq!(value_of(&app.doc, "applicant_fname").as_deref(), Some("Ada"));
    assert_eq!(value_of(&app.doc, "applicant_lname").as_deref(), Some("Lovelace"));
    assert_eq!(value_of(&app.doc, "email").as_deref(), Some("ada@example.com"));
    assert_eq!(value_of(&app.doc, "email_token").as_deref(), Some("abc"));
    assert_eq!(
        value_of(&app.doc, "phone_number").as_deref(),
        Some("+44 20 0000 0000")
    );
    assert_eq!(
        value_of(&app.doc, "notes").as_deref(),
        Some("I would like to apply.")
    );

    assert_eq!(value_of(&app.doc, "job_title_0").as_deref(), Some("Analyst"));
    assert_eq!(value_of(&app.doc, "company_0").as_deref(), Some("Babbage & Co"));
    assert_eq!(value_of(&app.doc, "job_title_1").as_deref(), Some("Translator"));
    assert_eq!(
        value_of(&app.doc, "company_1").as_deref(),
        Some("Taylor's Scientific Memoirs")
    );
    assert_eq!(value_of(&app.doc, "institution").as_deref(), Some("Private tutors"));
    assert_eq!(value_of(&app.doc, "degree_earned").as_deref(), Some("None"));

    assert_eq!(report.filled.len(), report.distinct_elements());
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);

    for field in &report.filled {
        let events = app.doc.events_for(field.element);
        assert_eq!(events.len(), 2, "{} should be notified once", field.label);
        assert!(events.iter().all(|e| e.bubbles));
    }
}

#[tokio::test]
async fn test_learn_then_fill_replays_mapping_from_disk() {
    let app = app(APPLICATION);
    let target = app.doc.query_selector("#q7").unwrap().unwrap();
    app.dispatcher.capture().capture(target);

    let Outcome::Learned(mapping) = run(
        &app,
        Command::Learn {
            profile_key: "custom.heardFrom".to_string(),
        },
    )
    .await
    else {
        panic!("expected a learned mapping");
    };
    assert_eq!(mapping.selector, "#q7");

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(app.store.path()).unwrap()).unwrap();
    assert_eq!(on_disk["customMappings"]["#q7"], "custom.heardFrom");

    let Outcome::Filled(report) = run(
        &app,
        Command::Fill {
            profile: Box::new(profile()),
        },
    )
    .await
    else {
        panic!("expected a fill report");
    };
    assert_eq!(app.doc.value(target).as_deref(), Some("A colleague"));
    assert!(report.filled.iter().any(|f| f.element == target
        && matches!(&f.source, FillSource::Learned { selector, .. } if selector == "#q7")));
}

#[tokio::test]
async fn test_learned_field_is_not_reused_by_keywords() {
    let app = app(r#"<input id="custom1" name="email_alt"><input name="email">"#);
    app.store
        .set("customMappings", json!({"#custom1": "custom.referral"}))
        .await
        .unwrap();

    let mut profile = profile();
    profile
        .custom_fields
        .insert("referral".to_string(), "Friend".to_string());
    run(
        &app,
        Command::Fill {
            profile: Box::new(profile),
        },
    )
    .await;

    assert_eq!(value_of(&app.doc, "email_alt").as_deref(), Some("Friend"));
    assert_eq!(value_of(&app.doc, "email").as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn test_more_entries_than_containers() {
    let app = app(
        r#"<div><h3>Employment</h3>
             <input name="position"><input name="employer">
           </div>"#,
    );
    let Outcome::Filled(report) = run(
        &app,
        Command::Fill {
            profile: Box::new(profile()),
        },
    )
    .await
    else {
        panic!("expected a fill report");
    };

    assert_eq!(value_of(&app.doc, "position").as_deref(), Some("Analyst"));
    assert_eq!(value_of(&app.doc, "employer").as_deref(), Some("Babbage & Co"));
    assert!(report.diagnostics.contains(&FillError::NoContainerForItem {
        section: "work experience".to_string(),
        index: 1,
    }));
    assert!(report.diagnostics.contains(&FillError::NoContainerForItem {
        section: "education".to_string(),
        index: 0,
    }));
}

#[tokio::test]
async fn test_learning_unselectable_element_touches_no_storage() {
    let app = app("<div><span>Label</span></div>");
    let span = app.doc.query_selector("span").unwrap().unwrap();
    // Text node: nothing to build a selector from.
    app.dispatcher.capture().capture(formfill_protocols::ElementId(span.0 + 1));

    let outcome = run(
        &app,
        Command::Learn {
            profile_key: "email".to_string(),
        },
    )
    .await;

    assert!(matches!(outcome, Outcome::Failed(FillError::SelectorUnavailable)));
    assert!(!app.store.path().exists());
}

#[tokio::test]
async fn test_stored_profile_round_trip_through_file() {
    let app = app(r#"<input name="fname">"#);
    app.store
        .set("userProfile", json!({"firstName": "Ada", "theme": "dark"}))
        .await
        .unwrap();

    let outcome = run(&app, Command::FillFromStore).await;
    assert!(matches!(outcome, Outcome::Filled(_)));
    assert_eq!(value_of(&app.doc, "fname").as_deref(), Some("Ada"));
}
