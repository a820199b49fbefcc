use jsondb::collection::{multi, skip_save, InsertOptions, JsonCollection, ModifyOptions};
use jsondb::common::Value;
use jsondb::doc;
use jsondb::errors::ErrorKind;
use jsondb::filter::{field, Query};
use jsondb_int_test::test_util::{
    await_file, cleanup, create_test_context, insert_test_documents, random_path, run_test,
};
use std::fs;

#[test]
fn test_save_and_load_round_trip() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.path().map(|p| p.to_path_buf()).unwrap_or_default();
            let snapshot = {
                let shared = ctx.collection();
                let mut collection = shared.lock();
                insert_test_documents(&mut collection)?;
                collection
                    .update(Query::by_id("p1"), doc! { "$push": { tags: "ops" } }, ModifyOptions::default())
                    .into_result()?;
                collection.remove(Query::by_id("p3"), ModifyOptions::default()).into_result()?;
                collection.close();
                collection.snapshot()
            };

            let reopened = JsonCollection::open(&path)?;
            assert_eq!(reopened.size(), 2);
            assert_eq!(reopened.snapshot(), snapshot);

            let docs = reopened.find(field("tags").includes("ops"), None).into_result()?;
            assert_eq!(docs.len(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_file_is_an_object_keyed_by_id() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.path().map(|p| p.to_path_buf()).unwrap_or_default();
            {
                let shared = ctx.collection();
                let mut collection = shared.lock();
                collection
                    .insert(doc! { _id: "k1", name: "first" }, InsertOptions::default())
                    .into_result()?;
                collection.close();
            }

            let content = fs::read_to_string(&path)?;
            assert_eq!(content, r#"{"k1":{"_id":"k1","name":"first"}}"#);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_mutations_save_automatically() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.path().map(|p| p.to_path_buf()).unwrap_or_default();
            let shared = ctx.collection();
            shared
                .lock()
                .insert(doc! { _id: "auto", n: 1 }, InsertOptions::default())
                .into_result()?;

            await_file(&path);
            ctx.registry().close_all();

            let reopened = JsonCollection::open(&path)?;
            assert_eq!(reopened.size(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_skip_save_defers_until_explicit_save() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.path().map(|p| p.to_path_buf()).unwrap_or_default();
            let shared = ctx.collection();
            let mut collection = shared.lock();

            collection.insert(doc! { _id: "a" }, skip_save()).into_result()?;
            collection.insert(doc! { _id: "b" }, skip_save()).into_result()?;
            collection
                .update(Query::all(), doc! { "$set": { seen: true } }, ModifyOptions::new(true, true))
                .into_result()?;
            assert!(!path.exists());

            collection.save();
            await_file(&path);
            collection.close();

            let reopened = JsonCollection::open(&path)?;
            assert_eq!(*reopened.count(doc! { seen: true }).data(), 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_failed_mutation_does_not_save() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.path().map(|p| p.to_path_buf()).unwrap_or_default();
            let shared = ctx.collection();
            let mut collection = shared.lock();

            let outcome = collection.insert(Value::from(42), InsertOptions::default());
            assert!(outcome.has_errors());
            let outcome = collection.remove(Query::all(), multi());
            assert_eq!(*outcome.data(), 0);
            let outcome = collection.update(Query::all(), doc! { "$set": { a: 1 } }, multi());
            assert_eq!(*outcome.data(), 0);

            std::thread::sleep(std::time::Duration::from_millis(100));
            assert!(!path.exists());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_open_missing_and_empty_files() {
    let path = random_path();
    let collection = JsonCollection::open(&path).unwrap();
    assert_eq!(collection.size(), 0);
    assert!(!path.exists());

    fs::write(&path, "").unwrap();
    let collection = JsonCollection::open(&path).unwrap();
    assert_eq!(collection.size(), 0);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_open_corrupted_file() {
    let path = random_path();
    for content in ["[]", "{\"a\": 3}", "{ not json", "null"] {
        fs::write(&path, content).unwrap();
        let err = JsonCollection::open(&path).err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::FileCorrupted, "{}", content);
    }
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_open_stamps_keys_as_ids() {
    let path = random_path();
    fs::write(&path, r#"{"a": {"v": 1}, "b": {"_id": "wrong", "v": 2}}"#).unwrap();

    let collection = JsonCollection::open(&path).unwrap();
    let a = collection.find_one(Query::by_id("a"), None).into_data();
    assert_eq!(a, Some(doc! { _id: "a", v: 1 }));
    let b = collection.find_one(Query::by_id("b"), None).into_data();
    assert_eq!(b, Some(doc! { _id: "b", v: 2 }));
    assert_eq!(*collection.count(Query::by_id("wrong")).data(), 0);

    fs::remove_file(&path).unwrap();
}
