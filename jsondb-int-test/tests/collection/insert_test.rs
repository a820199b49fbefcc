use jsondb::collection::{skip_save, InsertOptions, JsonCollection};
use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb::filter::Query;
use jsondb_int_test::test_util::{
    cleanup, create_memory_context, create_test_context, create_test_docs, run_test,
};
use std::collections::HashSet;

#[test]
fn test_insert() {
    run_test(
        create_test_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();

            for doc in create_test_docs() {
                let id = collection.insert(doc, InsertOptions::default()).into_result()?;
                assert!(id.is_some());
            }
            assert_eq!(collection.size(), 3);
            assert_eq!(*collection.count(Query::all()).data(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_generates_unique_ids() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();

            let mut ids = HashSet::new();
            for i in 0..500 {
                let id = collection
                    .insert(doc! { seq: i }, skip_save())
                    .into_result()?
                    .unwrap_or_default();
                assert_eq!(id.len(), 16);
                assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
                ids.insert(id);
            }
            assert_eq!(ids.len(), 500);

            for id in &ids {
                let doc = collection.find_one(Query::by_id(id), None).into_result()?;
                assert_eq!(doc.as_ref().and_then(|d| d.id()), Some(id.as_str()));
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_duplicate_id() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();

            collection.insert(doc! { _id: "a", v: 1 }, skip_save()).into_result()?;
            let outcome = collection.insert(doc! { _id: "a", v: 2 }, skip_save());
            assert_eq!(*outcome.data(), None);
            assert_eq!(
                outcome.error().map(|e| e.kind()),
                Some(&ErrorKind::UniqueConstraintViolation)
            );

            let stored = collection.find_one(Query::by_id("a"), None).into_result()?;
            assert_eq!(stored, Some(doc! { _id: "a", v: 1 }));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_invalid_candidates() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();

            for candidate in [doc! { _id: 5 }, doc! { _id: "" }, doc! { _id: (Value::Null) }] {
                let outcome = collection.insert(candidate, skip_save());
                assert_eq!(*outcome.data(), None);
                assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::InvalidId));
            }

            for candidate in [Value::from(1), Value::from("text"), Value::from(vec![1, 2])] {
                let outcome = collection.insert(candidate, skip_save());
                assert_eq!(*outcome.data(), None);
                assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::ValidationError));
            }

            assert_eq!(collection.size(), 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_insert_isolation() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();

            let mut candidate = doc! { _id: "iso", nested: { v: 1 }, list: [1] };
            collection.insert(candidate.clone(), skip_save()).into_result()?;

            candidate.put("nested", doc! { v: 2 });
            candidate.put("list", vec![1, 2, 3]);

            let stored = collection.find_one(Query::by_id("iso"), None).into_result()?;
            assert_eq!(stored, Some(doc! { _id: "iso", nested: { v: 1 }, list: [1] }));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_custom_id_length() {
    let mut collection = JsonCollection::builder().id_length(4).open().unwrap();
    let id = collection
        .insert(doc! { a: 1 }, InsertOptions::default())
        .into_data()
        .unwrap();
    assert_eq!(id.len(), 4);
}
