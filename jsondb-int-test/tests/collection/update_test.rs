use jsondb::collection::{multi, skip_save, ModifyOptions};
use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb::filter::{field, Query};
use jsondb_int_test::test_util::{
    cleanup, create_memory_context, create_test_context, insert_test_documents, run_test,
};

#[test]
fn test_update() {
    run_test(
        create_test_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let updated = collection
                .update(
                    field("first_name").eq("fn1"),
                    doc! { "$set": { last_name: "new-last-name" } },
                    ModifyOptions::default(),
                )
                .into_result()?;
            assert_eq!(updated, 1);

            let doc = collection.find_one(Query::by_id("p1"), None).into_result()?;
            assert_eq!(
                doc.and_then(|d| d.get("last_name").cloned()),
                Some(Value::from("new-last-name"))
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_set_is_idempotent() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let directive = doc! { "$set": { age: 50, status: "active" } };
            collection.update(Query::by_id("p3"), directive.clone(), skip_modify()).into_result()?;
            let once = collection.snapshot();

            collection.update(Query::by_id("p3"), directive, skip_modify()).into_result()?;
            assert_eq!(collection.snapshot(), once);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_all_operators() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let directive = doc! {
                "$inc": { age: 1, visits: 2 },
                "$push": { tags: "ops" },
                "$rename": { body: "bio" },
                "$unset": { address: true },
            };
            let updated = collection
                .update(Query::by_id("p1"), directive, skip_modify())
                .into_result()?;
            assert_eq!(updated, 1);

            let doc = collection
                .find_one(Query::by_id("p1"), None)
                .into_result()?
                .unwrap_or_default();
            assert_eq!(doc.get("age"), Some(&Value::from(33)));
            assert_eq!(doc.get("visits"), Some(&Value::from(2)));
            assert_eq!(
                doc.get("tags"),
                Some(&Value::from(vec!["admin", "dev", "ops"]))
            );
            assert!(doc.get("body").is_none());
            assert!(doc.get("bio").is_some());
            assert!(doc.get("address").is_none());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_inc_on_non_numeric_field() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;
            let before = collection.snapshot();

            let outcome = collection.update(
                Query::by_id("p2"),
                doc! { "$inc": { first_name: 1 } },
                skip_modify(),
            );
            assert_eq!(*outcome.data(), 0);
            assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::UpdateError));
            assert_eq!(collection.snapshot(), before);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_rejected_field_does_not_block_siblings() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let outcome = collection.update(
                Query::by_id("p2"),
                doc! { "$inc": { first_name: 1, age: 5 } },
                skip_modify(),
            );
            assert_eq!(*outcome.data(), 1);
            assert_eq!(outcome.errors().len(), 1);

            let doc = collection
                .find_one(Query::by_id("p2"), None)
                .into_result()?
                .unwrap_or_default();
            assert_eq!(doc.get("age"), Some(&Value::from(50)));
            assert_eq!(doc.get("first_name"), Some(&Value::from("fn2")));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_id_cannot_be_modified() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            for directive in [
                doc! { "$unset": { _id: true } },
                doc! { "$set": { _id: "other" } },
                doc! { "$rename": { _id: "key" } },
            ] {
                let outcome = collection.update(Query::by_id("p1"), directive, skip_modify());
                assert_eq!(*outcome.data(), 0);
                assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::UpdateError));
            }

            let doc = collection.find_one(Query::by_id("p1"), None).into_result()?;
            assert_eq!(doc.as_ref().and_then(|d| d.id()), Some("p1"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_multi_guard() {
    run_test(
        create_test_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;
            let before = collection.snapshot();

            let outcome = collection.update(
                field("last_name").eq("ln2"),
                doc! { "$set": { flagged: true } },
                ModifyOptions::default(),
            );
            assert_eq!(*outcome.data(), 0);
            assert_eq!(
                outcome.error().map(|e| e.kind()),
                Some(&ErrorKind::MultiMatchRejected)
            );
            assert_eq!(collection.snapshot(), before);

            let updated = collection
                .update(
                    field("last_name").eq("ln2"),
                    doc! { "$set": { flagged: true } },
                    multi(),
                )
                .into_result()?;
            assert_eq!(updated, 2);
            assert_eq!(*collection.count(doc! { flagged: true }).data(), 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_with_malformed_directive() {
    run_test(
        create_memory_context,
        |ctx| {
            let shared = ctx.collection();
            let mut collection = shared.lock();
            insert_test_documents(&mut collection)?;

            let outcome = collection.update(Query::by_id("p1"), Value::from("oops"), skip_modify());
            assert_eq!(*outcome.data(), 0);
            assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::UpdateError));

            let outcome = collection.update(
                Query::by_id("p1"),
                doc! { "$merge": { a: 1 } },
                skip_modify(),
            );
            assert_eq!(*outcome.data(), 0);
            assert_eq!(outcome.error().map(|e| e.kind()), Some(&ErrorKind::UpdateError));
            Ok(())
        },
        cleanup,
    )
}

fn skip_modify() -> ModifyOptions {
    ModifyOptions::new(false, true)
}
