use jsondb::collection::Document;
use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb::filter::{field, Query};
use jsondb_int_test::test_util::{cleanup, create_memory_context, insert_test_documents, run_test};

fn spec(doc: Document) -> Value {
    Value::from(doc)
}

#[test]
fn test_inclusive_projection() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let projection = spec(doc! { first_name: 1, missing: 1 });
            let docs = collection.find(field("age").gt(40), Some(&projection)).into_result()?;
            assert_eq!(docs, vec![doc! { _id: "p2", first_name: "fn2" }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_inclusive_projection_without_id() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let projection = spec(doc! { _id: 0, age: 1 });
            let docs = collection.find(Query::all(), Some(&projection)).into_result()?;
            assert_eq!(docs, vec![doc! { age: 32 }, doc! { age: 45 }, doc! { age: 27 }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_exclusive_projection() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let projection = spec(doc! { body: 0, tags: 0, address: 0, age: false });
            let doc = collection
                .find_one(Query::by_id("p3"), Some(&projection))
                .into_result()?;
            assert_eq!(
                doc,
                Some(doc! { _id: "p3", first_name: "fn3", last_name: "ln2" })
            );

            let projection = spec(doc! { _id: 0 });
            let doc = collection
                .find_one(Query::by_id("p3"), Some(&projection))
                .into_result()?
                .unwrap_or_default();
            assert!(doc.id().is_none());
            assert_eq!(doc.size(), 5);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_id_only_projection() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let projection = spec(doc! { _id: 1 });
            let docs = collection.find(Query::all(), Some(&projection)).into_result()?;
            assert_eq!(docs, vec![doc! { _id: "p1" }, doc! { _id: "p2" }, doc! { _id: "p3" }]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_empty_projection_returns_whole_documents() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let projection = spec(Document::new());
            let docs = collection.find(Query::all(), Some(&projection)).into_result()?;
            let full = collection.find(Query::all(), None).into_result()?;
            assert_eq!(docs, full);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_invalid_projection() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let mixed = spec(doc! { first_name: 1, age: 0 });
            let outcome = collection.find(Query::all(), Some(&mixed));
            assert!(outcome.data().is_empty());
            assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::ProjectionError));

            let outcome = collection.find_one(Query::by_id("p1"), Some(&Value::from(1)));
            assert!(outcome.data().is_none());
            assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::ProjectionError));
            Ok(())
        },
        cleanup,
    )
}
