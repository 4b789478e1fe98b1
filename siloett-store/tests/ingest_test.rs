//! Ingestion behavior: validation, dedup, supersession, extraction.

use siloett_core::canon::{DocumentKind, DocumentLocator};
use siloett_core::errors::IngestError;
use siloett_core::traits::ICanonStore;
use siloett_store::CanonStore;
use test_fixtures as fixtures;

#[test]
fn rejects_script_without_page_and_leaves_store_unchanged() {
    let store = CanonStore::open_in_memory().unwrap();
    let mut draft = fixtures::episode_2_8_script();
    draft.locator.page = None;

    let err = store.ingest(&draft).unwrap_err();
    match err {
        IngestError::MissingField { kind, field } => {
            assert_eq!(kind, DocumentKind::Script);
            assert_eq!(field, "page");
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
    assert_eq!(store.document_count(&fixtures::universe()).unwrap(), 0);
}

#[test]
fn rejects_script_without_episode() {
    let store = CanonStore::open_in_memory().unwrap();
    let mut draft = fixtures::episode_2_8_script();
    draft.locator.episode = None;

    assert!(matches!(
        store.ingest(&draft),
        Err(IngestError::MissingField { field: "episode", .. })
    ));
}

#[test]
fn rejects_empty_content() {
    let store = CanonStore::open_in_memory().unwrap();
    let mut draft = fixtures::world_bible();
    draft.content = "   \n".to_string();

    assert!(matches!(store.ingest(&draft), Err(IngestError::EmptyContent)));
}

#[test]
fn rejects_byte_identical_reingestion() {
    let store = CanonStore::open_in_memory().unwrap();
    store.ingest(&fixtures::world_bible()).unwrap();

    let err = store.ingest(&fixtures::world_bible()).unwrap_err();
    assert!(matches!(err, IngestError::DuplicateContent { .. }));
    assert_eq!(store.document_count(&fixtures::universe()).unwrap(), 1);
}

#[test]
fn reingesting_changed_content_supersedes_the_old_version() {
    let store = CanonStore::open_in_memory().unwrap();
    let first = store.ingest(&fixtures::character_bible_roy()).unwrap();

    let mut revised = fixtures::character_bible_roy();
    revised.content.push_str("\n## Known Aliases\nMaurice Moss's plus-one\n");
    let second = store.ingest(&revised).unwrap();

    let old = store.get_document(&first).unwrap().unwrap();
    assert_eq!(old.superseded_by.as_ref(), Some(&second));
    assert!(!old.is_active());

    // Active count unchanged: the new version replaced the old.
    assert_eq!(store.document_count(&fixtures::universe()).unwrap(), 1);

    // Facts from the superseded version are invisible to subject reads.
    let facts = store
        .all_facts_for(&fixtures::universe(), "roy/physical_status")
        .unwrap();
    assert!(facts.iter().all(|f| f.document_id == second));
}

#[test]
fn seeded_canon_extracts_the_expected_facts() {
    let store = CanonStore::open_in_memory().unwrap();
    fixtures::seed_canon(&store).unwrap();

    let physical = store
        .all_facts_for(&fixtures::universe(), "roy/physical_status")
        .unwrap();
    // One from the 2.8 script, two from the character bible.
    assert_eq!(physical.len(), 3);

    let world = store
        .facts_with_subject_prefix(&fixtures::universe(), "world/")
        .unwrap();
    assert!(world.iter().any(|f| f.subject == "world/the_internet"));

    let timeline = store
        .facts_with_subject_prefix(&fixtures::universe(), "timeline/")
        .unwrap();
    assert_eq!(timeline.len(), 3);
}

#[test]
fn every_extracted_quote_is_verbatim_document_text() {
    let store = CanonStore::open_in_memory().unwrap();
    let ids = fixtures::seed_canon(&store).unwrap();

    for id in &ids {
        let doc = store.get_document(id).unwrap().unwrap();
        for fact in store.facts_for_document(id).unwrap() {
            assert!(
                doc.content.contains(&fact.quote),
                "quote not found in {}: {:?}",
                doc.title,
                fact.quote
            );
        }
    }
}

#[test]
fn bible_without_page_is_rejected() {
    let store = CanonStore::open_in_memory().unwrap();
    let mut draft = fixtures::character_bible_moss();
    draft.locator = DocumentLocator::default();

    assert!(matches!(
        store.ingest(&draft),
        Err(IngestError::MissingField { field: "page", .. })
    ));
}

#[test]
fn ingested_canon_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canon.db");
    {
        let store = CanonStore::open(&path, 2).unwrap();
        fixtures::seed_canon(&store).unwrap();
    }

    let store = CanonStore::open(&path, 2).unwrap();
    assert_eq!(store.document_count(&fixtures::universe()).unwrap(), 5);
    let facts = store
        .all_facts_for(&fixtures::universe(), "roy/physical_status")
        .unwrap();
    assert_eq!(facts.len(), 3);
}

#[test]
fn ingest_and_supersession_are_audited() {
    let store = CanonStore::open_in_memory().unwrap();
    let first = store.ingest(&fixtures::world_bible()).unwrap();
    assert_eq!(store.audit_count(&first).unwrap(), 1);

    let mut updated = fixtures::world_bible();
    updated
        .content
        .push_str("- The Elders: The board answers to the Elders.\n");
    let second = store.ingest(&updated).unwrap();

    // The old version gains a supersede row; the new one has its ingest row.
    assert_eq!(store.audit_count(&first).unwrap(), 2);
    assert_eq!(store.audit_count(&second).unwrap(), 1);
}
