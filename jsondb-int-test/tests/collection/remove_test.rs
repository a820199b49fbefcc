use jsondb::collection::{multi, ModifyOptions};
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb::filter::{field, Query};
use jsondb_int_test::test_util::{
    cleanup, create_memory_context, create_test_context, insert_test_documents, run_test,
};

#[test]
fn test_remove() {
    run_test(
        create_test_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let removed = collection
                .remove(field("first_name").eq("fn1"), ModifyOptions::default())
                .into_result()?;
            assert_eq!(removed, 1);
            assert_eq!(collection.size(), 2);
            assert!(collection
                .find_one(Query::by_id("p1"), None)
                .into_result()?
                .is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_remove_multi_guard() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let outcome = collection.remove(doc! { last_name: "ln2" }, ModifyOptions::default());
            assert_eq!(*outcome.data(), 0);
            assert_eq!(
                outcome.error().map(|e| e.kind()),
                Some(&ErrorKind::MultiMatchRejected)
            );
            assert_eq!(collection.size(), 3);

            let removed = collection.remove(doc! { last_name: "ln2" }, multi()).into_result()?;
            assert_eq!(removed, 2);
            assert_eq!(collection.size(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_remove_all() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let removed = collection.remove(Query::all(), multi()).into_result()?;
            assert_eq!(removed, 3);
            assert_eq!(collection.size(), 0);

            let removed = collection.remove(Query::all(), multi()).into_result()?;
            assert_eq!(removed, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_remove_with_invalid_query() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let outcome = collection.remove(doc! { age: { "$gt": [1] } }, multi());
            assert_eq!(*outcome.data(), 0);
            assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::QueryError));
            assert_eq!(collection.size(), 3);
            Ok(())
        },
        cleanup,
    )
}
